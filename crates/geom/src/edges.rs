use serde::{Deserialize, Serialize};

use crate::Axis;

/// Insets on the four sides of a box, used for margins and padding.
#[derive(Debug, Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edges {
    /// Top inset.
    pub top: u32,
    /// Right inset.
    pub right: u32,
    /// Bottom inset.
    pub bottom: u32,
    /// Left inset.
    pub left: u32,
}

impl Edges {
    /// Construct insets in CSS order: top, right, bottom, left.
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same inset on every side.
    pub const fn all(v: u32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Zero insets.
    pub const fn zero() -> Self {
        Self::all(0)
    }

    /// Expand a CSS-style shorthand of one to four values.
    ///
    /// One value applies to all sides; two are (vertical, horizontal); three
    /// are (top, horizontal, bottom); four are (top, right, bottom, left).
    /// Returns `None` for any other length.
    pub fn from_shorthand(values: &[u32]) -> Option<Self> {
        match *values {
            [v] => Some(Self::all(v)),
            [v, h] => Some(Self::new(v, h, v, h)),
            [t, h, b] => Some(Self::new(t, h, b, h)),
            [t, r, b, l] => Some(Self::new(t, r, b, l)),
            _ => None,
        }
    }

    /// Sum of the left and right insets.
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of the top and bottom insets.
    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }

    /// Total inset along an axis.
    pub fn along(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    /// The leading inset (left or top) along an axis.
    pub fn leading(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.left,
            Axis::Vertical => self.top,
        }
    }
}
