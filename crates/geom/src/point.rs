use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A location in absolute pixel coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: u32,
    /// Vertical coordinate.
    pub y: u32,
}

impl Point {
    /// The origin.
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Shift the point by an unsigned offset, saturating at the coordinate limit.
    pub fn offset(&self, dx: u32, dy: u32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.offset(other.x, other.y)
    }
}

impl From<(u32, u32)> for Point {
    #[inline]
    fn from(v: (u32, u32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add() {
        assert_eq!(Point::zero() + (1u32, 1u32).into(), (1u32, 1u32).into());
        assert_eq!(Point::zero() + (1u32, 0u32).into(), (1u32, 0u32).into());
        assert_eq!(
            Point::from((u32::MAX, 0)) + (1u32, 1u32).into(),
            (u32::MAX, 1u32).into()
        );
    }
}
