use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Edges, Expanse, Point};

/// An axis-aligned rectangle with an absolute top-left corner.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Rect {
    /// Construct a rectangle from its origin and size.
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            tl: Point { x, y },
            w,
            h,
        }
    }

    /// A zero-sized rectangle at the origin.
    pub const fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Construct a rectangle at `tl` with the dimensions of `size`.
    pub fn at(tl: Point, size: Expanse) -> Self {
        Self {
            tl,
            w: size.w,
            h: size.h,
        }
    }

    /// The size of this rectangle.
    pub fn expanse(&self) -> Expanse {
        Expanse::new(self.w, self.h)
    }

    /// Shrink by insets on every side. The origin moves inward by the leading
    /// insets; the size saturates at zero.
    pub fn inset(&self, edges: Edges) -> Self {
        Self::at(
            self.tl.offset(edges.left, edges.top),
            self.expanse().shrink(edges),
        )
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} @ {},{}", self.w, self.h, self.tl.x, self.tl.y)
    }
}
