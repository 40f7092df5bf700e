//! Commands, command groups and the menu ordering engine.
//!
//! A [`CommandSet`] holds the commands an application exposes. Each command
//! sits in an optional [`Group`], possibly nested, and carries a section and
//! an order number. [`CommandSet::ordered`] flattens the set into a single
//! deterministic sequence of [`MenuItem`]s with group and section breaks,
//! ready for a backend to turn into native menus or toolbars.

/// Command records and activation.
mod command;
/// Hierarchical command groups.
mod group;
/// Sorting and break insertion.
mod order;
/// The command collection.
mod set;

pub use command::{Action, Command, CommandError};
pub use group::Group;
pub use order::{MenuItem, ordered};
pub use set::CommandSet;
