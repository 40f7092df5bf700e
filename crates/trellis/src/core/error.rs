use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::{NodeId, backend::BackendError};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// A widget id is already registered in the tree.
    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(String),

    /// No widget is registered under this id.
    #[error("not found: {0}")]
    NotFound(String),

    /// A style property was given a value outside its domain.
    #[error("invalid value {value:?} for style property {property}: {reason}")]
    InvalidStyleValue {
        /// Property name.
        property: String,
        /// Offending value, as written.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Node not found in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Attaching the child would create a cycle.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Parent node id.
        parent: NodeId,
        /// Child node id.
        child: NodeId,
    },

    /// A child appears more than once in a children list.
    #[error("duplicate child {child:?} under {parent:?}")]
    DuplicateChild {
        /// Parent node id.
        parent: NodeId,
        /// Duplicate child node id.
        child: NodeId,
    },

    /// The target widget is a leaf and cannot hold children.
    #[error("widget {0} cannot have children")]
    CannotHaveChildren(String),

    /// No native backend is registered.
    #[error("no native backend is installed")]
    NoBackend,

    /// A backend was requested by name but is not registered.
    #[error("unknown backend {name:?} (available: {})", .available.join(", "))]
    UnknownBackend {
        /// Requested backend name.
        name: String,
        /// Registered backend names.
        available: Vec<String>,
    },

    /// Several backends are installed and none targets this platform.
    #[error("no backend targets platform {platform} (installed: {})", .installed.join(", "))]
    NoMatchingBackend {
        /// Current platform name.
        platform: String,
        /// Registered backend names.
        installed: Vec<String>,
    },

    /// More than one installed backend targets this platform.
    #[error("several backends target platform {platform}: {}", .candidates.join(", "))]
    AmbiguousBackend {
        /// Current platform name.
        platform: String,
        /// Matching backend names.
        candidates: Vec<String>,
    },

    /// A native backend call failed.
    #[error("backend: {0}")]
    Backend(#[from] BackendError),

    /// Internal error.
    #[error("internal: {0}")]
    Internal(String),
}

impl Error {
    /// Construct an `InvalidStyleValue` error.
    pub fn invalid_style(
        property: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidStyleValue {
            property: property.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
