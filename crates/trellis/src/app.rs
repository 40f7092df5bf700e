//! The application service object.

use geom::Expanse;
use tracing::debug;

use crate::{
    NodeId, WidgetTree,
    backend::BackendFactory,
    commands::CommandSet,
    config::Config,
    core::dump::dump,
    error::Result,
};

/// An application: configuration, the widget tree on the selected backend,
/// the content root and the application command set.
pub struct App {
    /// Configuration the app was built with.
    config: Config,
    /// Widget tree.
    tree: WidgetTree,
    /// Root of the laid-out content.
    content: Option<NodeId>,
    /// Application commands.
    commands: CommandSet,
}

impl App {
    /// Select a backend from `factory` and build an empty application.
    pub fn new(config: Config, factory: &BackendFactory) -> Result<Self> {
        let backend = factory.select(config.backend.as_deref())?;
        debug!(backend = backend.name(), "starting app");
        Ok(Self {
            tree: WidgetTree::new(backend),
            config,
            content: None,
            commands: CommandSet::new(),
        })
    }

    /// Configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget tree, mutably.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// Application commands.
    pub fn commands(&self) -> &CommandSet {
        &self.commands
    }

    /// Application commands, mutably.
    pub fn commands_mut(&mut self) -> &mut CommandSet {
        &mut self.commands
    }

    /// The content root.
    pub fn content(&self) -> Option<NodeId> {
        self.content
    }

    /// Set the content root and lay it out.
    pub fn set_content(&mut self, root: NodeId) -> Result<()> {
        self.tree.get(root)?;
        self.content = Some(root);
        self.refresh()
    }

    /// Lay out the content root at the configured viewport.
    pub fn refresh(&mut self) -> Result<()> {
        let Some(root) = self.content else {
            return Ok(());
        };
        self.tree.layout(root, self.config.viewport)?;
        if self.config.debug_layout {
            debug!("layout:\n{}", dump(&self.tree, root)?);
        }
        Ok(())
    }

    /// Change the viewport and lay out again.
    pub fn resize(&mut self, viewport: Expanse) -> Result<()> {
        self.config.viewport = viewport;
        self.refresh()
    }
}
