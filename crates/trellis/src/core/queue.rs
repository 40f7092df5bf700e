use std::{cell::RefCell, fmt, mem, rc::Rc};

use tracing::warn;

use crate::{NodeId, layout::Style};

/// A deferred style edit.
type StyleEdit = Box<dyn FnOnce(&mut Style)>;

/// Shared queue state.
#[derive(Default)]
struct QueueState {
    /// True while a layout pass is running.
    active: bool,
    /// Pending edits, in push order.
    pending: Vec<(NodeId, StyleEdit)>,
}

/// A handle for deferring style mutations.
///
/// Collaborators that run during layout, such as a backend's measurement
/// callback, must not change styles directly. Edits pushed here while a pass
/// is active are held until the pass finishes and then trigger another
/// layout; edits pushed outside a pass are applied when the next one starts.
/// Handles are cheap to clone and share one queue.
#[derive(Clone, Default)]
pub struct StyleQueue {
    /// Shared state.
    state: Rc<RefCell<QueueState>>,
}

impl fmt::Debug for StyleQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("StyleQueue")
            .field("active", &state.active)
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl StyleQueue {
    /// Queue an edit to `node`'s style.
    pub fn push(&self, node: NodeId, edit: impl FnOnce(&mut Style) + 'static) {
        let mut state = self.state.borrow_mut();
        if state.active {
            warn!(?node, "style change requested during layout; deferred to next pass");
        }
        state.pending.push((node, Box::new(edit)));
    }

    /// Number of queued edits.
    pub fn len(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// True if no edits are queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while a layout pass is running.
    pub fn is_active(&self) -> bool {
        self.state.borrow().active
    }

    /// Mark the start or end of a layout pass.
    pub(super) fn set_active(&self, active: bool) {
        self.state.borrow_mut().active = active;
    }

    /// Take all queued edits.
    pub(super) fn drain(&self) -> Vec<(NodeId, StyleEdit)> {
        mem::take(&mut self.state.borrow_mut().pending)
    }
}
