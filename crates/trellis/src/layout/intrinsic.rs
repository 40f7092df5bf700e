use std::fmt;

use geom::{Axis, Edges};

/// One dimension of an intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    /// The content wants exactly this many pixels.
    Exact(u32),
    /// The content needs at least this many pixels and can use more.
    AtLeast(u32),
}

impl Default for Dim {
    fn default() -> Self {
        Self::Exact(0)
    }
}

impl Dim {
    /// The pixel value, regardless of kind.
    pub fn value(self) -> u32 {
        match self {
            Self::Exact(v) | Self::AtLeast(v) => v,
        }
    }

    /// True for a lower bound.
    pub fn is_at_least(self) -> bool {
        matches!(self, Self::AtLeast(_))
    }

    /// The size a parent may never shrink this dimension below. Exact values
    /// impose no floor on a flexed node.
    pub fn floor(self) -> u32 {
        match self {
            Self::Exact(_) => 0,
            Self::AtLeast(v) => v,
        }
    }

    /// Convert to a lower bound with the same value.
    pub fn loosen(self) -> Self {
        Self::AtLeast(self.value())
    }

    /// Add a fixed amount, keeping the kind.
    pub fn grow(self, by: u32) -> Self {
        self.map(|v| v.saturating_add(by))
    }

    /// Sum of two dimensions. A lower bound on either side makes a lower bound.
    pub fn plus(self, other: Self) -> Self {
        let v = self.value().saturating_add(other.value());
        if self.is_at_least() || other.is_at_least() {
            Self::AtLeast(v)
        } else {
            Self::Exact(v)
        }
    }

    /// Maximum of two dimensions. A lower bound on either side makes a lower
    /// bound.
    pub fn max(self, other: Self) -> Self {
        let v = self.value().max(other.value());
        if self.is_at_least() || other.is_at_least() {
            Self::AtLeast(v)
        } else {
            Self::Exact(v)
        }
    }

    /// Replace with an explicit size. The explicit size wins over an exact
    /// value but never undercuts a lower bound.
    pub fn with_explicit(self, explicit: Option<u32>) -> Self {
        match explicit {
            Some(v) => Self::Exact(v.max(self.floor())),
            None => self,
        }
    }

    /// Apply `f` to the value, keeping the kind.
    fn map(self, f: impl FnOnce(u32) -> u32) -> Self {
        match self {
            Self::Exact(v) => Self::Exact(f(v)),
            Self::AtLeast(v) => Self::AtLeast(f(v)),
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "{v}"),
            Self::AtLeast(v) => write!(f, ">={v}"),
        }
    }
}

/// The natural size a widget's content demands before layout negotiation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IntrinsicSize {
    /// Width hint.
    pub width: Dim,
    /// Height hint.
    pub height: Dim,
}

impl IntrinsicSize {
    /// A size of exactly `w` x `h`.
    pub fn exact(w: u32, h: u32) -> Self {
        Self {
            width: Dim::Exact(w),
            height: Dim::Exact(h),
        }
    }

    /// A size of at least `w` x `h`.
    pub fn at_least(w: u32, h: u32) -> Self {
        Self {
            width: Dim::AtLeast(w),
            height: Dim::AtLeast(h),
        }
    }

    /// Construct from main-axis and cross-axis dimensions.
    pub fn from_axis(axis: Axis, main: Dim, cross: Dim) -> Self {
        match axis {
            Axis::Horizontal => Self {
                width: main,
                height: cross,
            },
            Axis::Vertical => Self {
                width: cross,
                height: main,
            },
        }
    }

    /// The dimension along an axis.
    pub fn along(&self, axis: Axis) -> Dim {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Grow both dimensions by the insets.
    pub fn grow(self, edges: Edges) -> Self {
        Self {
            width: self.width.grow(edges.horizontal()),
            height: self.height.grow(edges.vertical()),
        }
    }

    /// Apply explicit width and height overrides.
    pub fn with_explicit(self, width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            width: self.width.with_explicit(width),
            height: self.height.with_explicit(height),
        }
    }
}

impl fmt::Display for IntrinsicSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_least_propagates() {
        let a = Dim::Exact(10);
        let b = Dim::AtLeast(5);
        assert_eq!(a.plus(a), Dim::Exact(20));
        assert_eq!(a.plus(b), Dim::AtLeast(15));
        assert_eq!(a.max(b), Dim::AtLeast(10));
        assert_eq!(b.grow(3), Dim::AtLeast(8));
    }

    #[test]
    fn explicit_respects_floor() {
        assert_eq!(Dim::Exact(50).with_explicit(Some(10)), Dim::Exact(10));
        assert_eq!(Dim::AtLeast(50).with_explicit(Some(10)), Dim::Exact(50));
        assert_eq!(Dim::AtLeast(50).with_explicit(Some(80)), Dim::Exact(80));
        assert_eq!(Dim::AtLeast(50).with_explicit(None), Dim::AtLeast(50));
    }

    #[test]
    fn floors() {
        assert_eq!(Dim::Exact(7).floor(), 0);
        assert_eq!(Dim::AtLeast(7).floor(), 7);
        assert_eq!(
            IntrinsicSize::exact(3, 4).grow(Edges::all(1)),
            IntrinsicSize::exact(5, 6)
        );
        assert_eq!(
            IntrinsicSize::from_axis(Axis::Vertical, Dim::Exact(1), Dim::AtLeast(2)),
            IntrinsicSize {
                width: Dim::AtLeast(2),
                height: Dim::Exact(1)
            }
        );
    }
}
