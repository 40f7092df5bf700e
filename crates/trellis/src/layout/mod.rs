//! Style record, intrinsic size model and the box layout resolver.
//!
//! Layout runs in two passes over a subtree. The bottom-up pass computes an
//! [`IntrinsicSize`] hint for every visible node: leaves are measured by the
//! native backend, containers sum their children along the main axis and take
//! the maximum along the cross axis. The top-down pass assigns each node an
//! outer box, strips margin and padding, and distributes the content box among
//! children according to their flex weights and the container's alignment.

/// Flex share allocation helpers.
mod flex;
/// Intrinsic size hints.
mod intrinsic;
/// The two-pass resolver.
pub(crate) mod pass;
/// The style record.
mod style;

pub use intrinsic::{Dim, IntrinsicSize};
pub use style::{Align, Direction, Display, Justify, Style};
