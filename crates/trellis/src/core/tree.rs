use std::collections::HashSet;

use geom::{Expanse, Rect};
use scopeguard::guard;
use slotmap::SlotMap;
use tracing::{debug, debug_span, warn};

use super::{
    NodeId, StyleQueue, WidgetRegistry,
    node::{Node, NodeLayout},
};
use crate::{
    backend::{NativeBackend, WidgetInfo},
    error::{Error, Result},
    layout::{Style, pass},
    widget::{Widget, WidgetMut},
};

/// The widget arena.
///
/// The tree owns every abstract widget, the registry of widget ids, and the
/// native backend. Widgets are created detached and attached with the
/// structural operations below; a widget has at most one parent, and
/// attaching it elsewhere detaches it first. Native widgets are created on the
/// first layout pass that reaches them and destroyed with their abstract
/// widget or when the tree is dropped.
pub struct WidgetTree {
    /// Node storage arena.
    nodes: SlotMap<NodeId, Node>,
    /// Widget id registry.
    registry: WidgetRegistry,
    /// Native backend.
    backend: Box<dyn NativeBackend>,
    /// Deferred style edits.
    queue: StyleQueue,
    /// True when a style or structure change has not been laid out yet.
    needs_layout: bool,
    /// Counter for generated widget ids.
    next_generated: u64,
}

impl WidgetTree {
    /// Construct an empty tree on a backend.
    pub fn new(backend: Box<dyn NativeBackend>) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            registry: WidgetRegistry::new(),
            backend,
            queue: StyleQueue::default(),
            needs_layout: true,
            next_generated: 1,
        }
    }

    /// The native backend.
    pub fn backend(&self) -> &dyn NativeBackend {
        self.backend.as_ref()
    }

    /// The widget id registry.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// A handle for deferring style edits from layout callbacks.
    pub fn style_queue(&self) -> StyleQueue {
        self.queue.clone()
    }

    /// True if a change has happened since the last successful layout pass.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Number of widgets in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Produce an id of the form `<kind>-<n>` that is not yet registered.
    fn generate_id(&mut self, widget: &Widget) -> String {
        loop {
            let id = format!("{}-{}", widget.kind.name(), self.next_generated);
            self.next_generated += 1;
            if !self.registry.contains(&id) {
                return id;
            }
        }
    }

    /// Create a detached widget and register its id. Fails with
    /// `DuplicateIdentifier` if the id is taken, in which case nothing is
    /// created.
    pub fn create(&mut self, widget: Widget) -> Result<NodeId> {
        let id = match &widget.id {
            Some(id) if self.registry.contains(id) => {
                return Err(Error::DuplicateIdentifier(id.clone()));
            }
            Some(id) => id.clone(),
            None => self.generate_id(&widget),
        };
        let node_id = self.nodes.insert(Node {
            id: id.clone(),
            kind: widget.kind,
            text: widget.text,
            style: widget.style,
            parent: None,
            children: Vec::new(),
            handle: None,
            intrinsic: None,
            layout: None,
            text_stale: false,
        });
        self.registry.add(&id, node_id)?;
        self.needs_layout = true;
        Ok(node_id)
    }

    /// A node, if it exists.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// A node, or `NodeNotFound`.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Find a node by widget id.
    pub fn lookup(&self, id: &str) -> Result<NodeId> {
        self.registry.lookup(id)
    }

    /// A node's style.
    pub fn style(&self, id: NodeId) -> Result<&Style> {
        Ok(&self.get(id)?.style)
    }

    /// Mutable access to a widget's properties.
    pub fn widget_mut(&mut self, id: NodeId) -> Result<WidgetMut<'_>> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        Ok(WidgetMut {
            id,
            node,
            dirty: &mut self.needs_layout,
        })
    }

    /// A node's parent.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.get(id)?.parent)
    }

    /// A node's children.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.get(id)?.children)
    }

    /// The frame committed to a node by the last successful layout pass.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id).and_then(|n| n.layout).map(|l| l.frame)
    }

    /// The boxes committed to a node by the last successful layout pass.
    pub fn layout_of(&self, id: NodeId) -> Option<NodeLayout> {
        self.nodes.get(id).and_then(|n| n.layout)
    }

    /// True if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = self.nodes.get(id).and_then(|n| n.parent);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.nodes.get(p).and_then(|n| n.parent);
        }
        false
    }

    /// Check that `parent` can take `child`.
    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let p = self.get(parent)?;
        self.get(child)?;
        if !p.kind.can_have_children() {
            return Err(Error::CannotHaveChildren(p.id.clone()));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        Ok(())
    }

    /// Detach a node from its parent, if any.
    fn detach(&mut self, child: NodeId) {
        let parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(parent) = parent
            && let Some(node) = self.nodes.get_mut(parent)
        {
            node.children.retain(|id| *id != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
    }

    /// Append `child` to `parent`'s children, detaching it from any previous
    /// parent.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let len = self.get(parent)?.children.len();
        self.insert_child(parent, len, child)
    }

    /// Insert `child` at `index` among `parent`'s children. The index is
    /// clamped to the number of children after `child` has been detached.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        self.check_attach(parent, child)?;
        self.detach(child);
        let node = self.nodes.get_mut(parent).ok_or(Error::NodeNotFound(parent))?;
        let index = index.min(node.children.len());
        node.children.insert(index, child);
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
        self.needs_layout = true;
        Ok(())
    }

    /// Detach `child` from `parent`. Returns false if it was not a child. The
    /// child stays in the arena and keeps its id.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        self.get(parent)?;
        if self.get(child)?.parent != Some(parent) {
            return Ok(false);
        }
        self.detach(child);
        self.needs_layout = true;
        Ok(true)
    }

    /// Position of `child` among `parent`'s children.
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes
            .get(parent)
            .and_then(|n| n.children.iter().position(|id| *id == child))
    }

    /// Put `new` in the place of `old` among `parent`'s children. `old` is
    /// detached.
    pub fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) -> Result<()> {
        let Some(index) = self.index_of(parent, old) else {
            return Err(Error::NotFound(self.get(old)?.id.clone()));
        };
        if old == new {
            return Ok(());
        }
        self.check_attach(parent, new)?;
        self.detach(old);
        self.insert_child(parent, index, new)
    }

    /// Replace the children list for a parent. Children are detached from
    /// their previous parents; previous children not in the list become
    /// detached.
    pub fn set_children(&mut self, parent: NodeId, children: Vec<NodeId>) -> Result<()> {
        let p = self.get(parent)?;
        if !p.kind.can_have_children() && !children.is_empty() {
            return Err(Error::CannotHaveChildren(p.id.clone()));
        }

        let mut seen = HashSet::with_capacity(children.len());
        for child in &children {
            if !seen.insert(*child) {
                return Err(Error::DuplicateChild {
                    parent,
                    child: *child,
                });
            }
        }
        for child in &children {
            self.check_attach(parent, *child)?;
        }

        let old_children = self
            .nodes
            .get(parent)
            .map(|n| n.children.clone())
            .unwrap_or_default();
        for child in old_children {
            self.detach(child);
        }
        for child in &children {
            self.detach(*child);
            if let Some(node) = self.nodes.get_mut(*child) {
                node.parent = Some(parent);
            }
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children = children;
        }
        self.needs_layout = true;
        Ok(())
    }

    /// Detach all of `parent`'s children.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<()> {
        self.set_children(parent, Vec::new())
    }

    /// Dispose of a widget and its descendants: detach it, unregister every
    /// id and destroy every native handle.
    pub fn remove_subtree(&mut self, root: NodeId) -> Result<()> {
        self.get(root)?;
        self.detach(root);
        for id in self.subtree_post_order(root) {
            if let Some(node) = self.nodes.remove(id) {
                if let Some(handle) = node.handle {
                    self.backend.destroy(handle);
                }
                self.registry.remove(&node.id);
            }
        }
        self.needs_layout = true;
        Ok(())
    }

    /// Collect a subtree in pre-order, including the root.
    pub fn subtree_pre_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(node_id) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            out.push(node_id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// Collect a subtree in post-order, including the root.
    pub fn subtree_post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((node_id, visited)) = stack.pop() {
            let Some(node) = self.nodes.get(node_id) else {
                continue;
            };
            if visited {
                out.push(node_id);
                continue;
            }
            stack.push((node_id, true));
            for child in node.children.iter().rev() {
                stack.push((*child, false));
            }
        }
        out
    }

    /// Apply queued style edits. Returns the number applied.
    fn apply_queued(&mut self) -> usize {
        let edits = self.queue.drain();
        let count = edits.len();
        for (id, edit) in edits {
            if let Some(node) = self.nodes.get_mut(id) {
                edit(&mut node.style);
            }
        }
        count
    }

    /// Create native widgets for every node in the subtree that lacks one,
    /// and push changed text to those that already exist.
    fn realize(&mut self, root: NodeId) -> Result<()> {
        for id in self.subtree_pre_order(root) {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            if let Some(handle) = node.handle {
                if node.text_stale {
                    debug!(id = %node.id, "updating native text");
                    self.backend.set_text(handle, node.text.as_deref())?;
                    node.text_stale = false;
                }
                continue;
            }
            let info = WidgetInfo {
                node: id,
                id: &node.id,
                kind: node.kind,
                text: node.text.as_deref(),
            };
            let handle = self.backend.create(&info)?;
            debug!(id = %node.id, raw = handle.raw(), "realized native widget");
            if let Some(node) = self.nodes.get_mut(id) {
                node.handle = Some(handle);
                node.text_stale = false;
            }
        }
        Ok(())
    }

    /// Re-apply committed frames to native widgets that a failed pass had
    /// already moved. Nodes that were never laid out are left where they are.
    fn restore_bounds(&mut self, moved: &[NodeId]) {
        for id in moved {
            let Some(node) = self.nodes.get(*id) else {
                continue;
            };
            let (Some(handle), Some(layout)) = (node.handle, node.layout) else {
                continue;
            };
            if let Err(e) = self.backend.apply_bounds(handle, layout.frame) {
                warn!(id = %node.id, error = %e, "could not restore bounds");
            }
        }
    }

    /// Lay out the subtree at `root` inside an outer box of `viewport`.
    ///
    /// The pass is all-or-nothing: bounds are resolved for every node first,
    /// then applied to the backend, and only committed to the tree when every
    /// step succeeded. On error the previously committed bounds remain, and
    /// native widgets already moved by the failed pass are moved back.
    /// Style edits queued while the pass runs are applied afterwards and
    /// leave the tree needing another layout.
    pub fn layout(&mut self, root: NodeId, viewport: Expanse) -> Result<()> {
        self.get(root)?;
        let _span = debug_span!("layout", ?root, w = viewport.w, h = viewport.h).entered();

        if self.apply_queued() > 0 {
            self.needs_layout = true;
        }
        self.realize(root)?;

        let resolved = {
            self.queue.set_active(true);
            let queue = self.queue.clone();
            let _active = guard((), move |()| queue.set_active(false));

            let resolved = pass::resolve(&self.nodes, self.backend.as_ref(), root, viewport)?;
            let mut moved = Vec::with_capacity(resolved.order.len());
            for id in &resolved.order {
                let (Some(node), Some(layout)) = (self.nodes.get(*id), resolved.layouts.get(id))
                else {
                    continue;
                };
                let Some(handle) = node.handle else {
                    continue;
                };
                if let Err(e) = self.backend.apply_bounds(handle, layout.frame) {
                    self.restore_bounds(&moved);
                    return Err(e.into());
                }
                moved.push(*id);
            }
            resolved
        };

        for id in &resolved.order {
            if let Some(node) = self.nodes.get_mut(*id) {
                node.layout = resolved.layouts.get(id).copied();
                node.intrinsic = resolved.hints.get(id).copied();
            }
        }
        self.needs_layout = false;

        let deferred = self.apply_queued();
        if deferred > 0 {
            debug!(deferred, "applied style changes queued during layout");
            self.needs_layout = true;
        }
        Ok(())
    }
}

impl Drop for WidgetTree {
    fn drop(&mut self) {
        for node in self.nodes.values_mut() {
            if let Some(handle) = node.handle.take() {
                self.backend.destroy(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        WidgetKind,
        backend::{BackendError, DummyBackend, DummyEvent},
        layout::Direction,
    };

    /// A tree on the dummy backend.
    fn tree() -> WidgetTree {
        WidgetTree::new(Box::new(DummyBackend::create().1))
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut t = tree();
        let a = t.create(Widget::label("a")).unwrap();
        t.create(Widget::label("b").with_id("label-2")).unwrap();
        let c = t.create(Widget::label("c")).unwrap();
        assert_eq!(t.get(a).unwrap().id(), "label-1");
        assert_eq!(t.get(c).unwrap().id(), "label-3");
    }

    #[test]
    fn duplicate_id_creates_nothing() {
        let mut t = tree();
        let a = t.create(Widget::label("a").with_id("x")).unwrap();
        assert_eq!(
            t.create(Widget::button("b").with_id("x")),
            Err(Error::DuplicateIdentifier("x".into()))
        );
        assert_eq!(t.len(), 1);
        assert_eq!(t.lookup("x"), Ok(a));
    }

    #[test]
    fn reparenting_detaches() {
        let mut t = tree();
        let p1 = t.create(Widget::container()).unwrap();
        let p2 = t.create(Widget::container()).unwrap();
        let c = t.create(Widget::label("c")).unwrap();
        t.add_child(p1, c).unwrap();
        t.add_child(p2, c).unwrap();
        assert!(t.children(p1).unwrap().is_empty());
        assert_eq!(t.children(p2).unwrap(), &[c]);
        assert_eq!(t.parent(c).unwrap(), Some(p2));
    }

    #[test]
    fn structural_errors() {
        let mut t = tree();
        let p = t.create(Widget::container().with_id("p")).unwrap();
        let q = t.create(Widget::container()).unwrap();
        let l = t.create(Widget::label("l").with_id("l")).unwrap();
        t.add_child(p, q).unwrap();
        assert_eq!(
            t.add_child(q, p),
            Err(Error::WouldCreateCycle { parent: q, child: p })
        );
        assert_eq!(
            t.add_child(p, p),
            Err(Error::WouldCreateCycle { parent: p, child: p })
        );
        assert_eq!(t.add_child(l, q), Err(Error::CannotHaveChildren("l".into())));
        assert_eq!(
            t.set_children(p, vec![l, l]),
            Err(Error::DuplicateChild { parent: p, child: l })
        );
    }

    #[test]
    fn insert_replace_and_index() {
        let mut t = tree();
        let p = t.create(Widget::container()).unwrap();
        let [a, b, c, d] = ["a", "b", "c", "d"].map(|id| {
            t.create(Widget::label(id).with_id(id)).unwrap()
        });
        t.set_children(p, vec![a, b]).unwrap();
        t.insert_child(p, 1, c).unwrap();
        assert_eq!(t.children(p).unwrap(), &[a, c, b]);
        t.insert_child(p, 99, a).unwrap();
        assert_eq!(t.children(p).unwrap(), &[c, b, a]);
        t.replace_child(p, b, d).unwrap();
        assert_eq!(t.children(p).unwrap(), &[c, d, a]);
        assert_eq!(t.parent(b).unwrap(), None);
        assert_eq!(t.index_of(p, a), Some(2));
        assert_eq!(t.index_of(p, b), None);
        assert_eq!(t.replace_child(p, b, d), Err(Error::NotFound("b".into())));
        assert!(t.remove_child(p, c).unwrap());
        assert!(!t.remove_child(p, c).unwrap());
        t.clear_children(p).unwrap();
        assert!(t.children(p).unwrap().is_empty());
        assert_eq!(t.parent(a).unwrap(), None);
    }

    #[test]
    fn remove_subtree_unregisters() {
        let (log, backend) = DummyBackend::create();
        let mut t = WidgetTree::new(Box::new(backend));
        let root = t.create(Widget::container().with_id("root")).unwrap();
        let p = t.create(Widget::container().with_id("p")).unwrap();
        let c = t.create(Widget::label("c").with_id("c")).unwrap();
        t.add_child(root, p).unwrap();
        t.add_child(p, c).unwrap();
        t.layout(root, Expanse::new(10, 10)).unwrap();
        assert_eq!(log.lock().unwrap().live_count(), 3);

        t.remove_subtree(p).unwrap();
        assert!(t.children(root).unwrap().is_empty());
        assert!(t.lookup("p").is_err());
        assert!(t.lookup("c").is_err());
        assert!(t.node(c).is_none());
        assert_eq!(log.lock().unwrap().live_count(), 1);
        assert!(!log.lock().unwrap().is_live("c"));
        assert_eq!(t.get(root).unwrap().kind(), WidgetKind::Container);
    }

    #[test]
    fn drop_destroys_handles() {
        let (log, backend) = DummyBackend::create();
        {
            let mut t = WidgetTree::new(Box::new(backend));
            let root = t.create(Widget::container()).unwrap();
            let a = t.create(Widget::label("a")).unwrap();
            t.add_child(root, a).unwrap();
            t.layout(root, Expanse::new(10, 10)).unwrap();
            assert_eq!(log.lock().unwrap().live_count(), 2);
        }
        assert_eq!(log.lock().unwrap().live_count(), 0);
    }

    #[test]
    fn style_writes_invalidate() {
        let mut t = tree();
        let root = t.create(Widget::container()).unwrap();
        t.layout(root, Expanse::new(10, 10)).unwrap();
        assert!(!t.needs_layout());
        t.widget_mut(root).unwrap().set_gap(3);
        assert!(t.needs_layout());
        t.layout(root, Expanse::new(10, 10)).unwrap();
        let err = t.widget_mut(root).unwrap().set_flex(-2.0);
        assert!(err.is_err());
        assert!(!t.needs_layout());
        assert_eq!(t.style(root).unwrap().gap(), 3);

        let err = t.widget_mut(root).unwrap().set_style_property("gap", "wide");
        assert!(matches!(err, Err(Error::InvalidStyleValue { .. })));
        assert!(!t.needs_layout());
        t.widget_mut(root)
            .unwrap()
            .set_style_property("direction", "column")
            .unwrap();
        assert!(t.needs_layout());
        assert_eq!(t.style(root).unwrap().direction(), Direction::Column);

        t.layout(root, Expanse::new(10, 10)).unwrap();
        t.widget_mut(root).unwrap().set_style(Style::row());
        assert!(t.needs_layout());
        assert_eq!(t.style(root).unwrap().gap(), 0);
    }

    #[test]
    fn text_changes_reach_native_widget() {
        let (log, backend) = DummyBackend::create();
        let mut t = WidgetTree::new(Box::new(backend));
        let root = t.create(Widget::container()).unwrap();
        let a = t.create(Widget::label("first").with_id("a")).unwrap();
        t.add_child(root, a).unwrap();

        t.widget_mut(a).unwrap().set_text("before realize");
        t.layout(root, Expanse::new(10, 10)).unwrap();
        assert_eq!(log.lock().unwrap().text("a"), Some("before realize"));

        t.widget_mut(a).unwrap().set_text("second");
        assert!(t.needs_layout());
        t.layout(root, Expanse::new(10, 10)).unwrap();
        t.layout(root, Expanse::new(10, 10)).unwrap();
        let log = log.lock().unwrap();
        assert_eq!(log.text("a"), Some("second"));
        let updates = log
            .events
            .iter()
            .filter(|e| matches!(e, DummyEvent::SetText { .. }))
            .count();
        assert_eq!(updates, 1);
    }

    #[test]
    fn failed_text_update_is_retried() {
        let (log, backend) = DummyBackend::create();
        let mut t = WidgetTree::new(Box::new(backend));
        let root = t.create(Widget::container()).unwrap();
        let a = t.create(Widget::label("old").with_id("a")).unwrap();
        t.add_child(root, a).unwrap();
        t.layout(root, Expanse::new(10, 10)).unwrap();

        log.lock().unwrap().fail_update("a");
        t.widget_mut(a).unwrap().set_text("new");
        assert!(matches!(
            t.layout(root, Expanse::new(10, 10)),
            Err(Error::Backend(BackendError::Update { .. }))
        ));
        assert_eq!(log.lock().unwrap().text("a"), Some("old"));

        log.lock().unwrap().clear_failures();
        t.layout(root, Expanse::new(10, 10)).unwrap();
        assert_eq!(log.lock().unwrap().text("a"), Some("new"));
    }
}
