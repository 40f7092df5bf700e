use geom::Rect;

use crate::{
    NodeId,
    backend::NativeHandle,
    layout::{IntrinsicSize, Style},
    widget::WidgetKind,
};

/// Resolved boxes for a node, in absolute coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NodeLayout {
    /// The margin box assigned by the parent.
    pub outer: Rect,
    /// The box inside the margin. This is what the native widget occupies.
    pub frame: Rect,
    /// The box inside the padding, where children are placed.
    pub content: Rect,
}

/// A widget in the arena.
pub struct Node {
    /// Registered widget id.
    pub(crate) id: String,
    /// Widget kind.
    pub(crate) kind: WidgetKind,
    /// Display text.
    pub(crate) text: Option<String>,
    /// Style record.
    pub(crate) style: Style,
    /// Parent back-reference.
    pub(crate) parent: Option<NodeId>,
    /// Owned children, in declaration order.
    pub(crate) children: Vec<NodeId>,
    /// Native widget, created lazily on first layout.
    pub(crate) handle: Option<NativeHandle>,
    /// Intrinsic hint from the last committed pass.
    pub(crate) intrinsic: Option<IntrinsicSize>,
    /// Bounds from the last committed pass.
    pub(crate) layout: Option<NodeLayout>,
    /// Text changed since the native widget last saw it.
    pub(crate) text_stale: bool,
}

impl Node {
    /// Registered widget id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Widget kind.
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// Display text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Style record.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Parent node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Native handle, once realized.
    pub fn handle(&self) -> Option<NativeHandle> {
        self.handle
    }

    /// Intrinsic size computed by the last successful layout pass.
    pub fn intrinsic(&self) -> Option<IntrinsicSize> {
        self.intrinsic
    }

    /// Bounds computed by the last successful layout pass.
    pub fn layout(&self) -> Option<NodeLayout> {
        self.layout
    }
}
