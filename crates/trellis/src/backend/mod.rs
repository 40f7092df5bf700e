//! The contract between the toolkit core and a platform's native widgets.
//!
//! A backend owns the real platform objects. The core asks it to create one
//! native widget per abstract widget, to measure leaves during layout, to
//! position every widget once a pass has resolved, and to destroy native
//! widgets when their abstract counterparts go away. Backends are selected at
//! startup by a [`BackendFactory`].

/// Recording backend for tests.
mod dummy;
/// Backend registration and selection.
mod factory;

pub use dummy::{DummyBackend, DummyEvent, DummyLog};
pub use factory::{BackendConstructor, BackendFactory, current_platform};
use geom::Rect;
use thiserror::Error;

use crate::{NodeId, WidgetKind, layout::IntrinsicSize};

/// Failure reported by a native backend.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum BackendError {
    /// The native widget could not be created.
    #[error("create {widget}: {reason}")]
    Create {
        /// Widget id.
        widget: String,
        /// Native failure description.
        reason: String,
    },
    /// Measuring the native widget failed.
    #[error("measure {widget}: {reason}")]
    Measure {
        /// Widget id.
        widget: String,
        /// Native failure description.
        reason: String,
    },
    /// Positioning the native widget failed.
    #[error("apply bounds {widget}: {reason}")]
    ApplyBounds {
        /// Widget id.
        widget: String,
        /// Native failure description.
        reason: String,
    },
    /// Updating the native widget failed.
    #[error("update {widget}: {reason}")]
    Update {
        /// Widget id.
        widget: String,
        /// Native failure description.
        reason: String,
    },
    /// The handle does not belong to this backend.
    #[error("unknown native handle {0}")]
    UnknownHandle(u64),
    /// The backend could not be initialized.
    #[error("startup: {0}")]
    Startup(String),
}

/// A handle to a native widget, owned exclusively by its abstract widget.
///
/// The handle carries a non-owning back-reference to the abstract widget's
/// node so backend callbacks can be routed without a counted reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle {
    /// Backend-assigned identifier.
    raw: u64,
    /// The abstract widget this handle belongs to.
    node: NodeId,
}

impl NativeHandle {
    /// Construct a handle.
    pub fn new(raw: u64, node: NodeId) -> Self {
        Self { raw, node }
    }

    /// Backend-assigned identifier.
    pub fn raw(&self) -> u64 {
        self.raw
    }

    /// The abstract widget this handle belongs to.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Description of an abstract widget handed to [`NativeBackend::create`].
#[derive(Debug, Clone, Copy)]
pub struct WidgetInfo<'a> {
    /// Arena node.
    pub node: NodeId,
    /// Registered widget id.
    pub id: &'a str,
    /// Widget kind.
    pub kind: WidgetKind,
    /// Display text, for widgets that carry one.
    pub text: Option<&'a str>,
}

/// A platform backend.
pub trait NativeBackend {
    /// Backend name, as registered with the factory.
    fn name(&self) -> &str;

    /// Create the native widget for an abstract widget.
    fn create(&mut self, info: &WidgetInfo<'_>) -> Result<NativeHandle, BackendError>;

    /// Measure a leaf's content given the space available along its parent's
    /// cross axis. Called once per leaf per layout pass. Must not mutate
    /// layout-visible state.
    fn measure(&self, handle: NativeHandle, available_cross: u32)
    -> Result<IntrinsicSize, BackendError>;

    /// Position a native widget. `bounds` is the widget's frame: the box
    /// inside its margin, including padding, in absolute coordinates.
    fn apply_bounds(&mut self, handle: NativeHandle, bounds: Rect) -> Result<(), BackendError>;

    /// Replace the text shown by a native widget. Called during the next
    /// layout pass after the abstract widget's text changed, before it is
    /// measured.
    fn set_text(&mut self, handle: NativeHandle, text: Option<&str>) -> Result<(), BackendError>;

    /// Release a native widget.
    fn destroy(&mut self, handle: NativeHandle);
}
