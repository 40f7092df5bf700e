use std::result::Result as StdResult;

use indexmap::IndexMap;
use tracing::debug;

use super::{BackendError, DummyBackend, NativeBackend};
use crate::error::{Error, Result};

/// Constructor for a registered backend.
pub type BackendConstructor = Box<dyn Fn() -> StdResult<Box<dyn NativeBackend>, BackendError>>;

/// A registered backend and the platform it targets.
struct Registration {
    /// Platform name, as returned by [`current_platform`].
    platform: String,
    /// Constructor.
    construct: BackendConstructor,
}

/// Name of the platform this binary was compiled for.
pub fn current_platform() -> &'static str {
    if cfg!(target_arch = "wasm32") {
        "web"
    } else if cfg!(target_os = "macos") {
        "macOS"
    } else if cfg!(target_os = "ios") {
        "iOS"
    } else if cfg!(target_os = "android") {
        "android"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "freebsd") {
        "freeBSD"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// Resolves the native backend to use at startup.
///
/// Selection order: an explicitly requested name, then the only installed
/// backend, then the single installed backend targeting the current platform.
/// The dummy backend can always be requested by name but never wins an
/// implicit selection.
#[derive(Default)]
pub struct BackendFactory {
    /// Installed backends by name, in registration order.
    backends: IndexMap<String, Registration>,
}

impl BackendFactory {
    /// A factory with no installed backends.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a backend under `name`, targeting `platform`. Re-registering a
    /// name replaces the previous constructor.
    pub fn register(
        &mut self,
        name: &str,
        platform: &str,
        construct: impl Fn() -> StdResult<Box<dyn NativeBackend>, BackendError> + 'static,
    ) -> &mut Self {
        self.backends.insert(
            name.to_string(),
            Registration {
                platform: platform.to_string(),
                construct: Box::new(construct),
            },
        );
        self
    }

    /// Installed backend names, in registration order.
    pub fn names(&self) -> Vec<String> {
        self.backends.keys().cloned().collect()
    }

    /// Pick a backend name for `platform`.
    pub fn select_name(&self, explicit: Option<&str>, platform: &str) -> Result<String> {
        if let Some(name) = explicit {
            if name == DummyBackend::NAME || self.backends.contains_key(name) {
                return Ok(name.to_string());
            }
            return Err(Error::UnknownBackend {
                name: name.to_string(),
                available: self.names(),
            });
        }
        match self.backends.len() {
            0 => return Err(Error::NoBackend),
            1 => return Ok(self.names().remove(0)),
            _ => {}
        }
        let candidates: Vec<String> = self
            .backends
            .iter()
            .filter(|(_, r)| r.platform == platform)
            .map(|(name, _)| name.clone())
            .collect();
        match candidates.as_slice() {
            [] => Err(Error::NoMatchingBackend {
                platform: platform.to_string(),
                installed: self.names(),
            }),
            [one] => Ok(one.clone()),
            _ => Err(Error::AmbiguousBackend {
                platform: platform.to_string(),
                candidates,
            }),
        }
    }

    /// Select and construct a backend for the current platform.
    pub fn select(&self, explicit: Option<&str>) -> Result<Box<dyn NativeBackend>> {
        let name = self.select_name(explicit, current_platform())?;
        debug!(backend = %name, "selected native backend");
        match self.backends.get(&name) {
            Some(reg) => Ok((reg.construct)()?),
            None => Ok(Box::new(DummyBackend::create().1)),
        }
    }
}
