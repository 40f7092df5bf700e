use serde::{Deserialize, Serialize};

use super::{Edges, Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expanse {
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl Expanse {
    /// Construct a size.
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Return a `Rect` with the same dimensions as the `Expanse`, but a location at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// Shrink by insets on every side, saturating at zero.
    pub fn shrink(&self, edges: Edges) -> Self {
        Self {
            w: self.w.saturating_sub(edges.horizontal()),
            h: self.h.saturating_sub(edges.vertical()),
        }
    }

    /// Grow by insets on every side.
    pub fn grow(&self, edges: Edges) -> Self {
        Self {
            w: self.w.saturating_add(edges.horizontal()),
            h: self.h.saturating_add(edges.vertical()),
        }
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(u32, u32)> for Expanse {
    fn from(v: (u32, u32)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_saturates() {
        let e = Expanse::new(4, 10);
        assert_eq!(e.shrink(Edges::all(1)), Expanse::new(2, 8));
        assert_eq!(e.shrink(Edges::all(3)), Expanse::new(0, 4));
        assert_eq!(e.shrink(Edges::all(3)).grow(Edges::all(3)), Expanse::new(6, 10));
    }
}
