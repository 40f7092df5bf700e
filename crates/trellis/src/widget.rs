//! Abstract widget descriptors and the style accessors exposed on live
//! widgets.

use geom::Edges;

use crate::{
    NodeId,
    core::node::Node,
    error::Result,
    layout::{Align, Direction, Display, Justify, Style},
};

/// The kind of an abstract widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// A container that lays out its children.
    Container,
    /// Static text.
    Label,
    /// A push button.
    Button,
    /// A single-line text entry.
    TextInput,
    /// A horizontal or vertical rule.
    Divider,
}

impl WidgetKind {
    /// True if widgets of this kind may hold children.
    pub fn can_have_children(self) -> bool {
        matches!(self, Self::Container)
    }

    /// Lower-case name used in generated ids and dumps.
    pub fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Label => "label",
            Self::Button => "button",
            Self::TextInput => "text_input",
            Self::Divider => "divider",
        }
    }
}

/// Construction parameters for a widget. Pass to
/// [`WidgetTree::create`](crate::WidgetTree::create) to place it in a tree.
#[derive(Debug, Clone)]
pub struct Widget {
    /// Requested id. A unique id is generated when absent.
    pub(crate) id: Option<String>,
    /// Widget kind.
    pub(crate) kind: WidgetKind,
    /// Display text.
    pub(crate) text: Option<String>,
    /// Initial style.
    pub(crate) style: Style,
}

impl Widget {
    /// A widget of the given kind with default style and no id.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            id: None,
            kind,
            text: None,
            style: Style::default(),
        }
    }

    /// A container.
    pub fn container() -> Self {
        Self::new(WidgetKind::Container)
    }

    /// A label showing `text`.
    pub fn label(text: &str) -> Self {
        Self::new(WidgetKind::Label).with_text(text)
    }

    /// A button showing `text`.
    pub fn button(text: &str) -> Self {
        Self::new(WidgetKind::Button).with_text(text)
    }

    /// A text input.
    pub fn text_input() -> Self {
        Self::new(WidgetKind::TextInput)
    }

    /// A divider.
    pub fn divider() -> Self {
        Self::new(WidgetKind::Divider)
    }

    /// Builder: set the id.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Builder: set the display text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Builder: set the style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Widget kind.
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }
}

/// Mutable access to a live widget's properties.
///
/// Every style write marks the owning tree as needing layout. Writes that
/// fail validation leave the style unchanged.
pub struct WidgetMut<'a> {
    /// Node being edited.
    pub(crate) id: NodeId,
    /// Arena record.
    pub(crate) node: &'a mut Node,
    /// The tree's layout invalidation flag.
    pub(crate) dirty: &'a mut bool,
}

impl WidgetMut<'_> {
    /// Arena id of the widget.
    pub fn node_id(&self) -> NodeId {
        self.id
    }

    /// Registered widget id.
    pub fn id(&self) -> &str {
        &self.node.id
    }

    /// Current style.
    pub fn style(&self) -> &Style {
        &self.node.style
    }

    /// Apply `f` to the style and invalidate layout if it succeeds.
    fn edit(&mut self, f: impl FnOnce(&mut Style) -> Result<()>) -> Result<()> {
        f(&mut self.node.style)?;
        *self.dirty = true;
        Ok(())
    }

    /// Replace the whole style.
    pub fn set_style(&mut self, style: Style) {
        self.node.style = style;
        *self.dirty = true;
    }

    /// Set the display text.
    pub fn set_text(&mut self, text: &str) {
        self.node.text = Some(text.to_string());
        self.node.text_stale = true;
        *self.dirty = true;
    }

    /// Set the layout direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.node.style.set_direction(direction);
        *self.dirty = true;
    }

    /// Set the display mode.
    pub fn set_display(&mut self, display: Display) {
        self.node.style.set_display(display);
        *self.dirty = true;
    }

    /// Set the flex weight.
    pub fn set_flex(&mut self, flex: f32) -> Result<()> {
        self.edit(|s| s.set_flex(flex))
    }

    /// Set the margin.
    pub fn set_margin(&mut self, margin: Edges) {
        self.node.style.set_margin(margin);
        *self.dirty = true;
    }

    /// Set the padding.
    pub fn set_padding(&mut self, padding: Edges) {
        self.node.style.set_padding(padding);
        *self.dirty = true;
    }

    /// Set or clear the explicit width.
    pub fn set_width(&mut self, width: Option<u32>) {
        self.node.style.set_width(width);
        *self.dirty = true;
    }

    /// Set or clear the explicit height.
    pub fn set_height(&mut self, height: Option<u32>) {
        self.node.style.set_height(height);
        *self.dirty = true;
    }

    /// Set the gap between children.
    pub fn set_gap(&mut self, gap: u32) {
        self.node.style.set_gap(gap);
        *self.dirty = true;
    }

    /// Set cross-axis alignment of children.
    pub fn set_align_items(&mut self, align: Align) {
        self.node.style.set_align_items(align);
        *self.dirty = true;
    }

    /// Set main-axis justification of children.
    pub fn set_justify_content(&mut self, justify: Justify) {
        self.node.style.set_justify_content(justify);
        *self.dirty = true;
    }

    /// Set a style property by name. See [`Style::set_property`].
    pub fn set_style_property(&mut self, name: &str, value: &str) -> Result<()> {
        self.edit(|s| s.set_property(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_containers_hold_children() {
        assert!(WidgetKind::Container.can_have_children());
        assert!(!WidgetKind::Label.can_have_children());
        assert!(!WidgetKind::Button.can_have_children());
    }

    #[test]
    fn builders() {
        let w = Widget::label("hi").with_id("greeting");
        assert_eq!(w.kind(), WidgetKind::Label);
        assert_eq!(w.id.as_deref(), Some("greeting"));
        assert_eq!(w.text.as_deref(), Some("hi"));
    }
}
