use indexmap::IndexMap;
use tracing::debug;

use crate::{
    NodeId,
    error::{Error, Result},
};

/// Maps widget ids to arena nodes and enforces id uniqueness.
///
/// Iteration follows insertion order. Removing an id that is not registered
/// is a no-op.
#[derive(Debug, Default, Clone)]
pub struct WidgetRegistry {
    /// Registered ids, in insertion order.
    ids: IndexMap<String, NodeId>,
}

impl WidgetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` for `node`. Fails with `DuplicateIdentifier` if the id is
    /// taken; the existing entry is kept.
    pub fn add(&mut self, id: &str, node: NodeId) -> Result<()> {
        if self.ids.contains_key(id) {
            return Err(Error::DuplicateIdentifier(id.to_string()));
        }
        debug!(id, "register widget");
        self.ids.insert(id.to_string(), node);
        Ok(())
    }

    /// Unregister `id`, returning the node it mapped to.
    pub fn remove(&mut self, id: &str) -> Option<NodeId> {
        let removed = self.ids.shift_remove(id);
        if removed.is_some() {
            debug!(id, "unregister widget");
        }
        removed
    }

    /// Look up the node registered for `id`.
    pub fn lookup(&self, id: &str) -> Result<NodeId> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// True if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    /// Number of registered widgets.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if no widgets are registered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Registered (id, node) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.ids.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    #[test]
    fn uniqueness_keeps_first() {
        let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = arena.insert(());
        let b = arena.insert(());
        let mut r = WidgetRegistry::new();
        r.add("x", a).unwrap();
        assert_eq!(r.add("x", b), Err(Error::DuplicateIdentifier("x".into())));
        assert_eq!(r.len(), 1);
        assert_eq!(r.lookup("x"), Ok(a));
    }

    #[test]
    fn remove_and_lookup() {
        let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
        let a = arena.insert(());
        let mut r = WidgetRegistry::new();
        r.add("a", a).unwrap();
        assert_eq!(r.remove("a"), Some(a));
        assert_eq!(r.remove("a"), None);
        assert_eq!(r.lookup("a"), Err(Error::NotFound("a".into())));
        assert!(r.is_empty());
    }

    #[test]
    fn insertion_order() {
        let mut arena: SlotMap<NodeId, ()> = SlotMap::with_key();
        let mut r = WidgetRegistry::new();
        for id in ["c", "a", "b", "d"] {
            r.add(id, arena.insert(())).unwrap();
        }
        r.remove("a");
        let ids: Vec<&str> = r.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["c", "b", "d"]);
    }
}
