use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use super::Group;

/// Handler run when a command is activated.
pub type Action = Box<dyn FnMut() -> anyhow::Result<()>>;

/// Counter for generated command ids.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Error type for command activation.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Unknown command identifier.
    #[error("unknown command: {id}")]
    UnknownCommand {
        /// Requested command id.
        id: String,
    },

    /// The command is disabled.
    #[error("command is disabled: {id}")]
    Disabled {
        /// Command id.
        id: String,
    },

    /// The command has no action.
    #[error("command has no action: {id}")]
    NoAction {
        /// Command id.
        id: String,
    },

    /// The action failed.
    #[error("command failed: {0}")]
    Exec(#[from] anyhow::Error),
}

/// A user-invokable command, rendered as a menu item or toolbar button.
pub struct Command {
    /// Unique id within a command set.
    id: String,
    /// Display text.
    text: String,
    /// Keyboard shortcut, in backend notation.
    shortcut: Option<String>,
    /// Tooltip text.
    tooltip: Option<String>,
    /// Icon resource name.
    icon: Option<String>,
    /// Owning group. `None` places the command at the root level.
    group: Option<Group>,
    /// Section within the group.
    section: i64,
    /// Order within the section.
    order: i64,
    /// Enabled flag, as set by the application.
    enabled: bool,
    /// Handler.
    action: Option<Action>,
}

impl Command {
    /// A command with `text`, a generated `cmd-<n>` id and no action.
    pub fn new(text: &str) -> Self {
        let n = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self {
            id: format!("cmd-{n}"),
            text: text.to_string(),
            shortcut: None,
            tooltip: None,
            icon: None,
            group: None,
            section: 0,
            order: 0,
            enabled: true,
            action: None,
        }
    }

    /// Builder: set the id.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Builder: set the keyboard shortcut.
    pub fn with_shortcut(mut self, shortcut: &str) -> Self {
        self.shortcut = Some(shortcut.to_string());
        self
    }

    /// Builder: set the tooltip.
    pub fn with_tooltip(mut self, tooltip: &str) -> Self {
        self.tooltip = Some(tooltip.to_string());
        self
    }

    /// Builder: set the icon.
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    /// Builder: place the command in a group.
    pub fn with_group(mut self, group: Group) -> Self {
        self.group = Some(group);
        self
    }

    /// Builder: set the section.
    pub fn with_section(mut self, section: i64) -> Self {
        self.section = section;
        self
    }

    /// Builder: set the order.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Builder: set the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder: set the action.
    pub fn with_action(mut self, action: impl FnMut() -> anyhow::Result<()> + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    /// Command id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Keyboard shortcut.
    pub fn shortcut(&self) -> Option<&str> {
        self.shortcut.as_deref()
    }

    /// Tooltip text.
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Icon resource name.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Owning group.
    pub fn group(&self) -> Option<&Group> {
        self.group.as_ref()
    }

    /// Section within the group.
    pub fn section(&self) -> i64 {
        self.section
    }

    /// Order within the section.
    pub fn order(&self) -> i64 {
        self.order
    }

    /// True if the command can be activated. A command without an action is
    /// never enabled.
    pub fn enabled(&self) -> bool {
        self.enabled && self.action.is_some()
    }

    /// Set the enabled flag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Set or replace the action.
    pub fn set_action(&mut self, action: impl FnMut() -> anyhow::Result<()> + 'static) {
        self.action = Some(Box::new(action));
    }

    /// Run the action.
    pub fn activate(&mut self) -> Result<(), CommandError> {
        if !self.enabled {
            return Err(CommandError::Disabled {
                id: self.id.clone(),
            });
        }
        let Some(action) = self.action.as_mut() else {
            return Err(CommandError::NoAction {
                id: self.id.clone(),
            });
        };
        action()?;
        Ok(())
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("group", &self.group)
            .field("section", &self.section)
            .field("order", &self.order)
            .field("enabled", &self.enabled())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn generated_ids() {
        let a = Command::new("A");
        let b = Command::new("B");
        assert!(a.id().starts_with("cmd-"));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn presentation_attributes() {
        let c = Command::new("Save")
            .with_shortcut("Ctrl+S")
            .with_tooltip("Save the document")
            .with_icon("save.png")
            .with_action(|| Ok(()));
        assert_eq!(c.shortcut(), Some("Ctrl+S"));
        assert_eq!(c.tooltip(), Some("Save the document"));
        assert_eq!(c.icon(), Some("save.png"));
        assert!(c.enabled());
        assert!(!c.with_enabled(false).enabled());
    }

    #[test]
    fn enabled_requires_action() {
        let mut c = Command::new("Quit");
        assert!(!c.enabled());
        assert!(matches!(c.activate(), Err(CommandError::NoAction { .. })));
        c.set_action(|| Ok(()));
        assert!(c.enabled());
        c.set_enabled(false);
        assert!(!c.enabled());
        assert!(matches!(c.activate(), Err(CommandError::Disabled { .. })));
    }

    #[test]
    fn activate_runs_action() {
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let mut c = Command::new("Go").with_action(move || {
            h.set(h.get() + 1);
            Ok(())
        });
        c.activate().unwrap();
        c.activate().unwrap();
        assert_eq!(hits.get(), 2);

        let mut bad = Command::new("Fail").with_action(|| anyhow::bail!("boom"));
        let err = bad.activate().unwrap_err();
        assert!(matches!(err, CommandError::Exec(_)));
        assert_eq!(err.to_string(), "command failed: boom");
    }
}
