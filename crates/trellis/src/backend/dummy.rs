use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use geom::Rect;

use super::{BackendError, NativeBackend, NativeHandle, WidgetInfo};
use crate::{WidgetKind, layout::IntrinsicSize};

/// A call recorded by the dummy backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DummyEvent {
    /// A native widget was created.
    Create {
        /// Widget id.
        id: String,
        /// Widget kind.
        kind: WidgetKind,
        /// Initial text.
        text: Option<String>,
    },
    /// A leaf was measured.
    Measure {
        /// Widget id.
        id: String,
        /// Space offered along the parent's cross axis.
        available_cross: u32,
    },
    /// Bounds were applied.
    ApplyBounds {
        /// Widget id.
        id: String,
        /// Frame rectangle.
        bounds: Rect,
    },
    /// A native widget's text was replaced.
    SetText {
        /// Widget id.
        id: String,
        /// New text.
        text: Option<String>,
    },
    /// A native widget was destroyed.
    Destroy {
        /// Widget id.
        id: String,
    },
}

/// Shared record of everything the dummy backend was asked to do, plus the
/// intrinsic hints and injected failures it answers with.
#[derive(Debug, Default)]
pub struct DummyLog {
    /// Recorded calls, in order.
    pub events: Vec<DummyEvent>,
    /// Intrinsic size reported per widget id.
    hints: HashMap<String, IntrinsicSize>,
    /// Widget ids whose creation fails.
    fail_create: HashSet<String>,
    /// Widget ids whose measurement fails.
    fail_measure: HashSet<String>,
    /// Widget ids whose bounds application fails.
    fail_apply: HashSet<String>,
    /// Widget ids whose text updates fail.
    fail_update: HashSet<String>,
    /// Live native widgets by raw handle.
    live: HashMap<u64, String>,
}

impl DummyLog {
    /// Report `size` when the widget `id` is measured.
    pub fn set_hint(&mut self, id: &str, size: IntrinsicSize) {
        self.hints.insert(id.to_string(), size);
    }

    /// Make creation of widget `id` fail.
    pub fn fail_create(&mut self, id: &str) {
        self.fail_create.insert(id.to_string());
    }

    /// Make measurement of widget `id` fail.
    pub fn fail_measure(&mut self, id: &str) {
        self.fail_measure.insert(id.to_string());
    }

    /// Make bounds application for widget `id` fail.
    pub fn fail_apply(&mut self, id: &str) {
        self.fail_apply.insert(id.to_string());
    }

    /// Make text updates of widget `id` fail.
    pub fn fail_update(&mut self, id: &str) {
        self.fail_update.insert(id.to_string());
    }

    /// Remove all injected failures.
    pub fn clear_failures(&mut self) {
        self.fail_create.clear();
        self.fail_measure.clear();
        self.fail_apply.clear();
        self.fail_update.clear();
    }

    /// Drop recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of times widget `id` was measured.
    pub fn measure_count(&self, id: &str) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DummyEvent::Measure { id: i, .. } if i == id))
            .count()
    }

    /// Number of times bounds were applied to widget `id`.
    pub fn apply_count(&self, id: &str) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DummyEvent::ApplyBounds { id: i, .. } if i == id))
            .count()
    }

    /// The text the native widget `id` currently shows.
    pub fn text(&self, id: &str) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            DummyEvent::Create { id: i, text, .. } | DummyEvent::SetText { id: i, text }
                if i == id =>
            {
                text.as_deref()
            }
            _ => None,
        })
    }

    /// The most recent bounds applied to widget `id`.
    pub fn bounds(&self, id: &str) -> Option<Rect> {
        self.events.iter().rev().find_map(|e| match e {
            DummyEvent::ApplyBounds { id: i, bounds } if i == id => Some(*bounds),
            _ => None,
        })
    }

    /// Number of native widgets currently alive.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// True if a native widget for `id` is alive.
    pub fn is_live(&self, id: &str) -> bool {
        self.live.values().any(|v| v == id)
    }
}

/// A backend with no platform behind it. Every call is recorded in a shared
/// [`DummyLog`]; measurement answers from hints registered there and defaults
/// to an exact zero size.
pub struct DummyBackend {
    /// Shared call log.
    log: Arc<Mutex<DummyLog>>,
    /// Next raw handle value.
    next: u64,
}

impl DummyBackend {
    /// Backend name used for registration and selection.
    pub const NAME: &'static str = "dummy";

    /// Create returns the shared `DummyLog` and a `DummyBackend` instance. The
    /// log can be used to inspect calls and configure measurement.
    pub fn create() -> (Arc<Mutex<DummyLog>>, Self) {
        let log = Arc::new(Mutex::new(DummyLog::default()));
        (log.clone(), Self { log, next: 1 })
    }

    /// Lock the shared log, recovering from a poisoned lock.
    fn log(&self) -> MutexGuard<'_, DummyLog> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NativeBackend for DummyBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn create(&mut self, info: &WidgetInfo<'_>) -> Result<NativeHandle, BackendError> {
        let raw = self.next;
        let mut log = self.log();
        if log.fail_create.contains(info.id) {
            return Err(BackendError::Create {
                widget: info.id.to_string(),
                reason: "injected failure".into(),
            });
        }
        log.events.push(DummyEvent::Create {
            id: info.id.to_string(),
            kind: info.kind,
            text: info.text.map(str::to_string),
        });
        log.live.insert(raw, info.id.to_string());
        drop(log);
        self.next += 1;
        Ok(NativeHandle::new(raw, info.node))
    }

    fn measure(
        &self,
        handle: NativeHandle,
        available_cross: u32,
    ) -> Result<IntrinsicSize, BackendError> {
        let mut log = self.log();
        let id = log
            .live
            .get(&handle.raw())
            .cloned()
            .ok_or(BackendError::UnknownHandle(handle.raw()))?;
        log.events.push(DummyEvent::Measure {
            id: id.clone(),
            available_cross,
        });
        if log.fail_measure.contains(&id) {
            return Err(BackendError::Measure {
                widget: id,
                reason: "injected failure".into(),
            });
        }
        Ok(log.hints.get(&id).copied().unwrap_or_default())
    }

    fn apply_bounds(&mut self, handle: NativeHandle, bounds: Rect) -> Result<(), BackendError> {
        let mut log = self.log();
        let id = log
            .live
            .get(&handle.raw())
            .cloned()
            .ok_or(BackendError::UnknownHandle(handle.raw()))?;
        if log.fail_apply.contains(&id) {
            return Err(BackendError::ApplyBounds {
                widget: id,
                reason: "injected failure".into(),
            });
        }
        log.events.push(DummyEvent::ApplyBounds { id, bounds });
        Ok(())
    }

    fn set_text(&mut self, handle: NativeHandle, text: Option<&str>) -> Result<(), BackendError> {
        let mut log = self.log();
        let id = log
            .live
            .get(&handle.raw())
            .cloned()
            .ok_or(BackendError::UnknownHandle(handle.raw()))?;
        if log.fail_update.contains(&id) {
            return Err(BackendError::Update {
                widget: id,
                reason: "injected failure".into(),
            });
        }
        log.events.push(DummyEvent::SetText {
            id,
            text: text.map(str::to_string),
        });
        Ok(())
    }

    fn destroy(&mut self, handle: NativeHandle) {
        let mut log = self.log();
        if let Some(id) = log.live.remove(&handle.raw()) {
            log.events.push(DummyEvent::Destroy { id });
        }
    }
}
