use crate::{Expanse, Point};

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    Horizontal,
    /// The y axis.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Extent of `size` along this axis.
    pub fn of(self, size: Expanse) -> u32 {
        match self {
            Self::Horizontal => size.w,
            Self::Vertical => size.h,
        }
    }

    /// Coordinate of `point` along this axis.
    pub fn coord(self, point: Point) -> u32 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Build a size from a main-axis and cross-axis extent.
    pub fn size(self, main: u32, cross: u32) -> Expanse {
        match self {
            Self::Horizontal => Expanse::new(main, cross),
            Self::Vertical => Expanse::new(cross, main),
        }
    }

    /// Build a point from a main-axis and cross-axis coordinate.
    pub fn point(self, main: u32, cross: u32) -> Point {
        match self {
            Self::Horizontal => Point { x: main, y: cross },
            Self::Vertical => Point { x: cross, y: main },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_cross_roundtrip() {
        let s = Axis::Vertical.size(10, 3);
        assert_eq!(s, Expanse::new(3, 10));
        assert_eq!(Axis::Vertical.of(s), 10);
        assert_eq!(Axis::Vertical.cross().of(s), 3);
        assert_eq!(Axis::Horizontal.point(4, 7), Point { x: 4, y: 7 });
    }
}
