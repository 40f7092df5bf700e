use std::fmt;

use geom::{Axis, Edges};

use crate::error::{Error, Result};

/// Layout direction of a container's children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Children are laid out left to right.
    #[default]
    Row,
    /// Children are laid out top to bottom.
    Column,
}

impl Direction {
    /// The main axis for this direction.
    pub fn axis(self) -> Axis {
        match self {
            Self::Row => Axis::Horizontal,
            Self::Column => Axis::Vertical,
        }
    }
}

/// Whether a node takes part in layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Display {
    /// The node is laid out normally.
    #[default]
    Pack,
    /// The node and its subtree are removed from layout.
    None,
}

/// Cross-axis alignment of children within a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Align {
    /// Align to the leading edge.
    Start,
    /// Center within the available space.
    Center,
    /// Align to the trailing edge.
    End,
    /// Fill the available space.
    #[default]
    Stretch,
}

/// Main-axis placement of a container's children when space is left over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Justify {
    /// Pack children at the leading edge.
    #[default]
    Start,
    /// Center the run of children.
    Center,
    /// Pack children at the trailing edge.
    End,
}

/// Box-model style for a single widget.
///
/// Values are validated when written: a `Style` never holds a negative or
/// non-finite flex weight, so the resolver does not need to clamp.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Main-axis direction for children.
    direction: Direction,
    /// Layout participation.
    display: Display,
    /// Share of a container's leftover main-axis space.
    flex: f32,
    /// Outer insets.
    margin: Edges,
    /// Inner insets.
    padding: Edges,
    /// Explicit width override.
    width: Option<u32>,
    /// Explicit height override.
    height: Option<u32>,
    /// Space between adjacent visible children.
    gap: u32,
    /// Cross-axis alignment of children.
    align_items: Align,
    /// Main-axis placement of children.
    justify_content: Justify,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            display: Display::default(),
            flex: 0.0,
            margin: Edges::zero(),
            padding: Edges::zero(),
            width: None,
            height: None,
            gap: 0,
            align_items: Align::default(),
            justify_content: Justify::default(),
        }
    }
}

/// Reject flex weights that are negative or not finite.
fn check_flex(flex: f32) -> Result<f32> {
    if !flex.is_finite() {
        return Err(Error::invalid_style("flex", flex.to_string(), "must be finite"));
    }
    if flex < 0.0 {
        return Err(Error::invalid_style(
            "flex",
            flex.to_string(),
            "must be non-negative",
        ));
    }
    Ok(flex)
}

impl Style {
    /// A default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// A style laying children out in a row.
    pub fn row() -> Self {
        Self::default().with_direction(Direction::Row)
    }

    /// A style laying children out in a column.
    pub fn column() -> Self {
        Self::default().with_direction(Direction::Column)
    }

    /// Builder: set the direction.
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Builder: set the display mode.
    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    /// Builder: set the flex weight.
    pub fn with_flex(mut self, flex: f32) -> Result<Self> {
        self.set_flex(flex)?;
        Ok(self)
    }

    /// Builder: set the margin.
    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    /// Builder: set the padding.
    pub fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Builder: set an explicit width.
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Builder: set an explicit height.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Builder: set the gap between children.
    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    /// Builder: set cross-axis alignment.
    pub fn with_align_items(mut self, align: Align) -> Self {
        self.align_items = align;
        self
    }

    /// Builder: set main-axis justification.
    pub fn with_justify_content(mut self, justify: Justify) -> Self {
        self.justify_content = justify;
        self
    }

    /// Layout direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Display mode.
    pub fn display(&self) -> Display {
        self.display
    }

    /// Flex weight. Zero means the node keeps its intrinsic main-axis size.
    pub fn flex(&self) -> f32 {
        self.flex
    }

    /// Margin insets.
    pub fn margin(&self) -> Edges {
        self.margin
    }

    /// Padding insets.
    pub fn padding(&self) -> Edges {
        self.padding
    }

    /// Explicit width, if any.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Explicit height, if any.
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Explicit size along an axis, if any.
    pub fn size_along(&self, axis: Axis) -> Option<u32> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Gap between adjacent visible children.
    pub fn gap(&self) -> u32 {
        self.gap
    }

    /// Cross-axis alignment of children.
    pub fn align_items(&self) -> Align {
        self.align_items
    }

    /// Main-axis justification of children.
    pub fn justify_content(&self) -> Justify {
        self.justify_content
    }

    /// True if the node takes part in layout.
    pub fn is_visible(&self) -> bool {
        self.display == Display::Pack
    }

    /// True if the node claims a share of leftover main-axis space along `axis`.
    /// An explicit size along the axis takes precedence over the flex weight.
    /// During layout a leaf measured at an exact non-zero size keeps that size.
    pub fn is_flexed(&self, axis: Axis) -> bool {
        self.flex > 0.0 && self.size_along(axis).is_none()
    }

    /// Set the direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Set the display mode.
    pub fn set_display(&mut self, display: Display) {
        self.display = display;
    }

    /// Set the flex weight. Negative and non-finite weights are rejected.
    pub fn set_flex(&mut self, flex: f32) -> Result<()> {
        self.flex = check_flex(flex)?;
        Ok(())
    }

    /// Set the margin.
    pub fn set_margin(&mut self, margin: Edges) {
        self.margin = margin;
    }

    /// Set the padding.
    pub fn set_padding(&mut self, padding: Edges) {
        self.padding = padding;
    }

    /// Set or clear the explicit width.
    pub fn set_width(&mut self, width: Option<u32>) {
        self.width = width;
    }

    /// Set or clear the explicit height.
    pub fn set_height(&mut self, height: Option<u32>) {
        self.height = height;
    }

    /// Set the gap between children.
    pub fn set_gap(&mut self, gap: u32) {
        self.gap = gap;
    }

    /// Set cross-axis alignment.
    pub fn set_align_items(&mut self, align: Align) {
        self.align_items = align;
    }

    /// Set main-axis justification.
    pub fn set_justify_content(&mut self, justify: Justify) {
        self.justify_content = justify;
    }

    /// Set a property from its textual name and value.
    ///
    /// Names use snake case (`align_items`, `padding_left`). Sizes are
    /// non-negative integers; `width` and `height` also accept `none` to clear
    /// the override. `margin` and `padding` take one to four integers separated
    /// by spaces or commas. On error the style is left unchanged.
    pub fn set_property(&mut self, name: &str, value: &str) -> Result<()> {
        let v = value.trim();
        match name {
            "direction" => {
                self.direction = match v {
                    "row" => Direction::Row,
                    "column" => Direction::Column,
                    _ => return Err(Error::invalid_style(name, value, "expected row or column")),
                }
            }
            "display" => {
                self.display = match v {
                    "pack" => Display::Pack,
                    "none" => Display::None,
                    _ => return Err(Error::invalid_style(name, value, "expected pack or none")),
                }
            }
            "flex" => {
                let flex: f32 = v
                    .parse()
                    .map_err(|_| Error::invalid_style(name, value, "expected a number"))?;
                check_flex(flex).map_err(|e| match e {
                    Error::InvalidStyleValue { reason, .. } => {
                        Error::invalid_style(name, value, reason)
                    }
                    other => other,
                })?;
                self.flex = flex;
            }
            "width" => self.width = parse_optional_size(name, value)?,
            "height" => self.height = parse_optional_size(name, value)?,
            "gap" => self.gap = parse_size(name, value)?,
            "margin" => self.margin = parse_edges(name, value)?,
            "padding" => self.padding = parse_edges(name, value)?,
            "margin_top" => self.margin.top = parse_size(name, value)?,
            "margin_right" => self.margin.right = parse_size(name, value)?,
            "margin_bottom" => self.margin.bottom = parse_size(name, value)?,
            "margin_left" => self.margin.left = parse_size(name, value)?,
            "padding_top" => self.padding.top = parse_size(name, value)?,
            "padding_right" => self.padding.right = parse_size(name, value)?,
            "padding_bottom" => self.padding.bottom = parse_size(name, value)?,
            "padding_left" => self.padding.left = parse_size(name, value)?,
            "align_items" => {
                self.align_items = match v {
                    "start" => Align::Start,
                    "center" => Align::Center,
                    "end" => Align::End,
                    "stretch" => Align::Stretch,
                    _ => {
                        return Err(Error::invalid_style(
                            name,
                            value,
                            "expected start, center, end or stretch",
                        ));
                    }
                }
            }
            "justify_content" => {
                self.justify_content = match v {
                    "start" => Justify::Start,
                    "center" => Justify::Center,
                    "end" => Justify::End,
                    _ => {
                        return Err(Error::invalid_style(
                            name,
                            value,
                            "expected start, center or end",
                        ));
                    }
                }
            }
            _ => return Err(Error::invalid_style(name, value, "unknown property")),
        }
        Ok(())
    }
}

/// Parse a non-negative pixel size.
fn parse_size(name: &str, value: &str) -> Result<u32> {
    let v = value.trim();
    match v.parse::<i64>() {
        Ok(n) if n < 0 => Err(Error::invalid_style(name, value, "must be non-negative")),
        Ok(n) => u32::try_from(n).map_err(|_| Error::invalid_style(name, value, "too large")),
        Err(_) => Err(Error::invalid_style(name, value, "expected an integer")),
    }
}

/// Parse a size that may be cleared with `none`.
fn parse_optional_size(name: &str, value: &str) -> Result<Option<u32>> {
    if value.trim() == "none" {
        return Ok(None);
    }
    parse_size(name, value).map(Some)
}

/// Parse a one to four value inset shorthand.
fn parse_edges(name: &str, value: &str) -> Result<Edges> {
    let parts = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(|p| parse_size(name, p).map_err(|_| bad_shorthand(name, value)))
        .collect::<Result<Vec<_>>>()?;
    Edges::from_shorthand(&parts).ok_or_else(|| bad_shorthand(name, value))
}

/// Error for a malformed inset shorthand.
fn bad_shorthand(name: &str, value: &str) -> Error {
    Error::invalid_style(name, value, "expected one to four non-negative integers")
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            Direction::Row => "row",
            Direction::Column => "column",
        };
        write!(f, "{dir}")?;
        if self.display == Display::None {
            write!(f, " display=none")?;
        }
        if self.flex > 0.0 {
            write!(f, " flex={}", self.flex)?;
        }
        if let Some(w) = self.width {
            write!(f, " width={w}")?;
        }
        if let Some(h) = self.height {
            write!(f, " height={h}")?;
        }
        if self.gap > 0 {
            write!(f, " gap={}", self.gap)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Style::default();
        assert_eq!(s.direction(), Direction::Row);
        assert_eq!(s.align_items(), Align::Stretch);
        assert_eq!(s.justify_content(), Justify::Start);
        assert_eq!(s.flex(), 0.0);
        assert!(s.is_visible());
    }

    #[test]
    fn flex_rejects_bad_values() {
        let mut s = Style::new();
        assert!(matches!(
            s.set_flex(-1.0),
            Err(Error::InvalidStyleValue { .. })
        ));
        assert!(s.set_flex(f32::NAN).is_err());
        assert!(s.set_flex(f32::INFINITY).is_err());
        assert_eq!(s.flex(), 0.0);
        s.set_flex(2.5).unwrap();
        assert_eq!(s.flex(), 2.5);
    }

    #[test]
    fn explicit_size_overrides_flex() {
        let s = Style::row().with_flex(1.0).unwrap().with_width(30);
        assert!(!s.is_flexed(Axis::Horizontal));
        assert!(s.is_flexed(Axis::Vertical));
    }

    #[test]
    fn set_property() {
        let mut s = Style::new();
        s.set_property("direction", "column").unwrap();
        s.set_property("flex", "1.5").unwrap();
        s.set_property("padding", "1 2").unwrap();
        s.set_property("margin", "1,2,3").unwrap();
        s.set_property("margin_left", "9").unwrap();
        s.set_property("width", "40").unwrap();
        s.set_property("align_items", "center").unwrap();
        s.set_property("justify_content", "end").unwrap();
        s.set_property("display", "none").unwrap();
        assert_eq!(s.direction(), Direction::Column);
        assert_eq!(s.flex(), 1.5);
        assert_eq!(s.padding(), Edges::new(1, 2, 1, 2));
        assert_eq!(s.margin(), Edges::new(1, 2, 3, 9));
        assert_eq!(s.width(), Some(40));
        assert_eq!(s.align_items(), Align::Center);
        assert_eq!(s.justify_content(), Justify::End);
        assert_eq!(s.display(), Display::None);
        s.set_property("width", "none").unwrap();
        assert_eq!(s.width(), None);
    }

    #[test]
    fn set_property_rejects() {
        let mut s = Style::new();
        let before = s.clone();
        for (name, value) in [
            ("width", "-5"),
            ("height", "tall"),
            ("flex", "-1"),
            ("flex", "NaN"),
            ("padding", "1 2 3 4 5"),
            ("padding", ""),
            ("margin", "1 -2"),
            ("direction", "diagonal"),
            ("colour", "red"),
        ] {
            let err = s.set_property(name, value).unwrap_err();
            match err {
                Error::InvalidStyleValue { property, value: v, .. } => {
                    assert_eq!(property, name);
                    assert_eq!(v, value);
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
        assert_eq!(s, before);
    }
}
