use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use super::{Command, CommandError, MenuItem, ordered};

/// Listener invoked after every membership change.
type ChangeListener = Box<dyn FnMut()>;

/// A collection of commands keyed by id.
///
/// Adding a command whose id is already present replaces the existing entry.
/// The registered change listener fires after every add, remove or clear, so
/// a backend can rebuild its menus from [`CommandSet::ordered`].
#[derive(Default)]
pub struct CommandSet {
    /// Commands by id.
    commands: IndexMap<String, Command>,
    /// Change listener.
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for CommandSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandSet")
            .field("commands", &self.commands.values().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl CommandSet {
    /// Construct an empty command set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the change listener, replacing any previous one.
    pub fn set_on_change(&mut self, listener: impl FnMut() + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    /// Invoke the change listener.
    fn changed(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener();
        }
    }

    /// Add commands to the set.
    pub fn add(&mut self, commands: impl IntoIterator<Item = Command>) {
        let mut added = 0usize;
        for cmd in commands {
            debug!(id = cmd.id(), "add command");
            self.commands.insert(cmd.id().to_string(), cmd);
            added += 1;
        }
        if added > 0 {
            self.changed();
        }
    }

    /// Remove a command by id, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Command> {
        let removed = self.commands.shift_remove(id);
        if removed.is_some() {
            debug!(id, "remove command");
            self.changed();
        }
        removed
    }

    /// Remove a command by id if present.
    pub fn discard(&mut self, id: &str) {
        self.remove(id);
    }

    /// Remove every command.
    pub fn clear(&mut self) {
        if !self.commands.is_empty() {
            self.commands.clear();
            self.changed();
        }
    }

    /// True if a command with `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    /// Get a command by id.
    pub fn get(&self, id: &str) -> Option<&Command> {
        self.commands.get(id)
    }

    /// Get a command by id, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Command> {
        self.commands.get_mut(id)
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over all commands in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> + '_ {
        self.commands.values()
    }

    /// The render-ready command sequence.
    pub fn ordered(&self) -> Vec<MenuItem<'_>> {
        ordered(self.commands.values())
    }

    /// Activate a command by id.
    pub fn activate(&mut self, id: &str) -> Result<(), CommandError> {
        self.commands
            .get_mut(id)
            .ok_or_else(|| CommandError::UnknownCommand { id: id.to_string() })?
            .activate()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    /// A set with a counting change listener.
    fn counted() -> (CommandSet, Rc<Cell<usize>>) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut set = CommandSet::new();
        set.set_on_change(move || c.set(c.get() + 1));
        (set, count)
    }

    #[test]
    fn add_replaces_by_id() {
        let (mut set, count) = counted();
        set.add([Command::new("One").with_id("x"), Command::new("Two").with_id("y")]);
        set.add([Command::new("Three").with_id("x")]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("x").map(Command::text), Some("Three"));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn remove_discard_clear() {
        let (mut set, count) = counted();
        set.add([Command::new("A").with_id("a"), Command::new("B").with_id("b")]);
        assert!(set.remove("a").is_some());
        assert!(set.remove("a").is_none());
        set.discard("missing");
        assert_eq!(count.get(), 2);
        assert!(set.contains("b"));
        set.clear();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(count.get(), 3);
        set.add(Vec::new());
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn activate_by_id() {
        let mut set = CommandSet::new();
        set.add([Command::new("A").with_id("a").with_action(|| Ok(()))]);
        set.activate("a").unwrap();
        assert!(matches!(
            set.activate("nope"),
            Err(CommandError::UnknownCommand { .. })
        ));
    }
}
