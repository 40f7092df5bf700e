//! Geometry primitives used by the trellis layout engine.
//!
//! All quantities are unsigned pixel counts. Arithmetic saturates rather than
//! wrapping, so an oversized inset collapses a box to zero instead of
//! panicking.

/// Main/cross axis helpers.
mod axis;
/// Four-sided insets.
mod edges;
/// Width/height size type.
mod expanse;
/// Point helpers.
mod point;
/// Rectangle operations.
mod rect;

pub use axis::Axis;
pub use edges::Edges;
pub use expanse::Expanse;
pub use point::Point;
pub use rect::Rect;
