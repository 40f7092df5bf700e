/// Tree dump helpers for debugging.
pub mod dump;
/// Error types.
pub mod error;
/// Node identifiers.
mod id;
/// Per-widget arena records.
pub mod node;
/// Deferred style mutation queue.
mod queue;
/// Widget id registry.
mod registry;
/// The widget arena and structural operations.
mod tree;

pub use id::NodeId;
pub use queue::StyleQueue;
pub use registry::WidgetRegistry;
pub use tree::WidgetTree;
