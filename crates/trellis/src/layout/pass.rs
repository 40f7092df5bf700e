use std::collections::{HashMap, HashSet};

use geom::{Axis, Expanse, Point, Rect};
use slotmap::SlotMap;
use tracing::trace;

use super::{
    Align, Dim, IntrinsicSize, Style,
    flex::{align_offset, allocate_flex_shares, justify_offset},
};
use crate::{
    NodeId,
    backend::NativeBackend,
    core::node::{Node, NodeLayout},
    error::{Error, Result},
};

/// The result of resolving a subtree. Nothing here is visible to the tree
/// until the caller commits it.
#[derive(Debug, Default)]
pub struct Resolved {
    /// Every node in the subtree, in pre-order.
    pub order: Vec<NodeId>,
    /// Resolved boxes per node.
    pub layouts: HashMap<NodeId, NodeLayout>,
    /// Intrinsic hints for visible nodes.
    pub hints: HashMap<NodeId, IntrinsicSize>,
}

/// Resolve bounds for the subtree at `root`, which is given `viewport` as
/// its outer box.
pub fn resolve(
    nodes: &SlotMap<NodeId, Node>,
    backend: &dyn NativeBackend,
    root: NodeId,
    viewport: Expanse,
) -> Result<Resolved> {
    let mut pass = LayoutPass {
        nodes,
        backend,
        out: Resolved::default(),
        natural: HashSet::new(),
    };
    pass.measure(root, viewport, None)?;

    let node = pass.node(root)?;
    let outer = viewport.rect();
    if node.style.is_visible() {
        let mut frame = outer.inset(node.style.margin());
        if let Some(w) = node.style.width() {
            frame.w = w;
        }
        if let Some(h) = node.style.height() {
            frame.h = h;
        }
        pass.place(root, outer, frame)?;
    } else {
        pass.place_hidden(root, Point::zero())?;
    }
    Ok(pass.out)
}

/// State for a single layout pass.
struct LayoutPass<'a> {
    /// Node arena.
    nodes: &'a SlotMap<NodeId, Node>,
    /// Backend used for leaf measurement.
    backend: &'a dyn NativeBackend,
    /// Accumulated output.
    out: Resolved,
    /// Flexed leaves whose measured main-axis size is exact and non-zero.
    /// They keep that size instead of taking a flex share.
    natural: HashSet<NodeId>,
}

/// Per-child values used while distributing a container's content box.
struct Slot {
    /// Child node.
    id: NodeId,
    /// Whether the child takes part in layout.
    visible: bool,
    /// Resolved main-axis frame size.
    main: u32,
}

impl<'a> LayoutPass<'a> {
    /// Fetch a node from the arena.
    fn node(&self, id: NodeId) -> Result<&'a Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Whether `id` takes a share of the free space along `axis`.
    fn flexes(&self, id: NodeId, style: &Style, axis: Axis) -> bool {
        style.is_flexed(axis) && !self.natural.contains(&id)
    }

    /// Intrinsic hint recorded by the measure pass.
    fn hint(&self, id: NodeId) -> Result<IntrinsicSize> {
        self.out
            .hints
            .get(&id)
            .copied()
            .ok_or_else(|| Error::Internal(format!("no intrinsic size for {id:?}")))
    }

    /// Bottom-up pass: compute the intrinsic hint for `id` and its visible
    /// descendants. `avail` is the outer space offered by the parent and
    /// `parent_axis` is the parent's main axis.
    fn measure(
        &mut self,
        id: NodeId,
        avail: Expanse,
        parent_axis: Option<Axis>,
    ) -> Result<IntrinsicSize> {
        let node = self.node(id)?;
        let style = &node.style;
        if !style.is_visible() {
            return Ok(IntrinsicSize::default());
        }

        let mut inner = avail.shrink(style.margin());
        if let Some(w) = style.width() {
            inner.w = w;
        }
        if let Some(h) = style.height() {
            inner.h = h;
        }
        let inner = inner.shrink(style.padding());

        let content = if node.kind.can_have_children() {
            self.measure_children(id, inner)?
        } else {
            let handle = node.handle.ok_or_else(|| {
                Error::Internal(format!("widget {} has no native handle", node.id))
            })?;
            let cross = parent_axis.map_or(Axis::Horizontal, Axis::cross);
            let measured = self.backend.measure(handle, cross.of(inner))?;
            if let Some(axis) = parent_axis
                && style.is_flexed(axis)
                && let Dim::Exact(v) = measured.along(axis)
                && v > 0
            {
                self.natural.insert(id);
            }
            measured
        };

        let hint = content
            .grow(style.padding())
            .with_explicit(style.width(), style.height());
        trace!(id = %node.id, %hint, "measured");
        self.out.hints.insert(id, hint);
        Ok(hint)
    }

    /// Sum visible children along the container's main axis and take their
    /// maximum along the cross axis. Margins and gaps are included.
    fn measure_children(&mut self, id: NodeId, inner: Expanse) -> Result<IntrinsicSize> {
        let node = self.node(id)?;
        let axis = node.style.direction().axis();
        let gap = node.style.gap();

        let mut main = Dim::Exact(0);
        let mut cross = Dim::Exact(0);
        let mut visible = 0u32;
        for &child in &node.children {
            let child_style = &self.node(child)?.style;
            if !child_style.is_visible() {
                continue;
            }
            let margin = child_style.margin();
            let hint = self.measure(child, inner, Some(axis))?;
            let flexed = self.flexes(child, child_style, axis);

            let mut child_main = hint.along(axis).grow(margin.along(axis));
            if flexed {
                child_main = child_main.loosen();
            }
            main = main.plus(child_main);
            cross = cross.max(hint.along(axis.cross()).grow(margin.along(axis.cross())));
            visible += 1;
        }
        if visible > 1 {
            main = main.grow(gap.saturating_mul(visible - 1));
        }
        Ok(IntrinsicSize::from_axis(axis, main, cross))
    }

    /// Record boxes for `id` and lay out its children inside the content box.
    fn place(&mut self, id: NodeId, outer: Rect, frame: Rect) -> Result<()> {
        let node = self.node(id)?;
        let content = frame.inset(node.style.padding());
        trace!(id = %node.id, %frame, "placed");
        self.out.order.push(id);
        self.out.layouts.insert(
            id,
            NodeLayout {
                outer,
                frame,
                content,
            },
        );
        if node.kind.can_have_children() && !node.children.is_empty() {
            self.place_children(id, content)?;
        }
        Ok(())
    }

    /// Give `id` and all its descendants zero-size boxes at `at`.
    fn place_hidden(&mut self, id: NodeId, at: Point) -> Result<()> {
        let empty = Rect::at(at, Expanse::default());
        let node = self.node(id)?;
        self.out.order.push(id);
        self.out.layouts.insert(
            id,
            NodeLayout {
                outer: empty,
                frame: empty,
                content: empty,
            },
        );
        for &child in &node.children {
            self.place_hidden(child, at)?;
        }
        Ok(())
    }

    /// Resolve main-axis frame sizes for a container's children.
    fn main_sizes(&self, id: NodeId, content_main: u32) -> Result<Vec<Slot>> {
        let node = self.node(id)?;
        let axis = node.style.direction().axis();

        let mut slots = Vec::with_capacity(node.children.len());
        let mut fixed = 0u32;
        let mut weights = Vec::new();
        let mut visible = 0u32;
        for child in &node.children {
            let style = &self.node(*child)?.style;
            if !style.is_visible() {
                slots.push(Slot {
                    id: *child,
                    visible: false,
                    main: 0,
                });
                continue;
            }
            visible += 1;
            fixed = fixed.saturating_add(style.margin().along(axis));
            let main = self.hint(*child)?.along(axis);
            if self.flexes(*child, style, axis) {
                weights.push(style.flex());
            } else {
                fixed = fixed.saturating_add(main.value());
            }
            slots.push(Slot {
                id: *child,
                visible: true,
                main: main.value(),
            });
        }

        let gaps = node.style.gap().saturating_mul(visible.saturating_sub(1));
        let remaining = content_main.saturating_sub(fixed).saturating_sub(gaps);
        let mut shares = allocate_flex_shares(remaining, &weights).into_iter();
        for slot in slots.iter_mut().filter(|s| s.visible) {
            let style = &self.node(slot.id)?.style;
            if self.flexes(slot.id, style, axis) {
                let floor = self.hint(slot.id)?.along(axis).floor();
                slot.main = shares.next().unwrap_or(0).max(floor);
            }
        }
        Ok(slots)
    }

    /// Top-down pass for one container: distribute the content box among the
    /// children along the main axis and align them on the cross axis.
    fn place_children(&mut self, id: NodeId, content: Rect) -> Result<()> {
        let node = self.node(id)?;
        let axis = node.style.direction().axis();
        let cross = axis.cross();
        let gap = node.style.gap();
        let align = node.style.align_items();
        let justify = node.style.justify_content();
        let content_main = axis.of(content.expanse());
        let content_cross = cross.of(content.expanse());

        let slots = self.main_sizes(id, content_main)?;

        let mut used = 0u32;
        let mut any_flexed = false;
        let mut visible = 0u32;
        for slot in slots.iter().filter(|s| s.visible) {
            let style = &self.node(slot.id)?.style;
            any_flexed |= self.flexes(slot.id, style, axis);
            used = used
                .saturating_add(slot.main)
                .saturating_add(style.margin().along(axis));
            visible += 1;
        }
        used = used.saturating_add(gap.saturating_mul(visible.saturating_sub(1)));
        let offset = if any_flexed {
            0
        } else {
            justify_offset(used, content_main, justify)
        };

        let cross_origin = cross.coord(content.tl);
        let mut cursor = axis.coord(content.tl).saturating_add(offset);
        for slot in slots {
            if !slot.visible {
                self.place_hidden(slot.id, axis.point(cursor, cross_origin))?;
                continue;
            }
            let style = &self.node(slot.id)?.style;
            let margin = style.margin();
            let hint = self.hint(slot.id)?.along(cross);

            let cross_avail = content_cross.saturating_sub(margin.along(cross));
            let cross_size = if style.size_along(cross).is_some() {
                hint.value()
            } else if align == Align::Stretch {
                cross_avail.max(hint.floor())
            } else {
                hint.value()
            };
            let cross_start = cross_origin
                .saturating_add(margin.leading(cross))
                .saturating_add(align_offset(cross_size, cross_avail, align));
            let main_start = cursor.saturating_add(margin.leading(axis));

            let frame = Rect::at(
                axis.point(main_start, cross_start),
                axis.size(slot.main, cross_size),
            );
            let outer = Rect::new(
                frame.tl.x.saturating_sub(margin.left),
                frame.tl.y.saturating_sub(margin.top),
                frame.w.saturating_add(margin.horizontal()),
                frame.h.saturating_add(margin.vertical()),
            );
            self.place(slot.id, outer, frame)?;

            cursor = cursor
                .saturating_add(axis.of(outer.expanse()))
                .saturating_add(gap);
        }
        Ok(())
    }
}
