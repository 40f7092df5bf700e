//! Tests for application startup and refresh.

#[cfg(test)]
mod tests {
    use trellis::{
        App, Error, Widget,
        backend::{BackendFactory, DummyBackend, NativeBackend},
        commands::{Command, Group},
        config::Config,
        geom::{Expanse, Rect},
        layout::{IntrinsicSize, Style},
    };

    /// A config forcing the dummy backend.
    fn dummy_config() -> Config {
        Config {
            backend: Some("dummy".into()),
            viewport: Expanse::new(200, 100),
            debug_layout: true,
            ..Config::default()
        }
    }

    #[test]
    fn startup_with_dummy() {
        let mut app = App::new(dummy_config(), &BackendFactory::new()).unwrap();
        assert_eq!(app.tree().backend().name(), "dummy");

        let tree = app.tree_mut();
        let root = tree
            .create(Widget::container().with_style(Style::row()))
            .unwrap();
        let a = tree
            .create(Widget::button("Go").with_style(Style::new().with_flex(1.0).unwrap()))
            .unwrap();
        tree.add_child(root, a).unwrap();

        app.set_content(root).unwrap();
        assert_eq!(app.tree().bounds(a), Some(Rect::new(0, 0, 200, 100)));

        app.resize(Expanse::new(80, 40)).unwrap();
        assert_eq!(app.tree().bounds(a), Some(Rect::new(0, 0, 80, 40)));
        assert_eq!(app.config().viewport, Expanse::new(80, 40));
    }

    #[test]
    fn factory_selection_errors_abort_startup() {
        let config = Config::default();
        assert_eq!(
            App::new(config, &BackendFactory::new()).err().map(|e| e.to_string()),
            Some(Error::NoBackend.to_string())
        );

        let config = Config {
            backend: Some("cocoa".into()),
            ..Config::default()
        };
        assert!(matches!(
            App::new(config, &BackendFactory::new()),
            Err(Error::UnknownBackend { .. })
        ));
    }

    #[test]
    fn single_registered_backend_is_used() {
        let mut factory = BackendFactory::new();
        factory.register("only", "nowhere", || {
            let (log, backend) = DummyBackend::create();
            log.lock()
                .unwrap()
                .set_hint("label", IntrinsicSize::exact(5, 5));
            Ok(Box::new(backend) as Box<dyn NativeBackend>)
        });
        let app = App::new(Config::default(), &factory).unwrap();
        assert!(app.content().is_none());
    }

    #[test]
    fn refresh_without_content_is_noop() {
        let mut app = App::new(dummy_config(), &BackendFactory::new()).unwrap();
        app.refresh().unwrap();
        assert!(app.content().is_none());
        assert!(app.tree().is_empty());
    }

    #[test]
    fn set_content_requires_a_live_node() {
        let mut app = App::new(dummy_config(), &BackendFactory::new()).unwrap();
        let n = app.tree_mut().create(Widget::container()).unwrap();
        app.tree_mut().remove_subtree(n).unwrap();
        assert_eq!(app.set_content(n), Err(Error::NodeNotFound(n)));
    }

    #[test]
    fn app_commands() {
        let mut app = App::new(dummy_config(), &BackendFactory::new()).unwrap();
        app.commands_mut().add([
            Command::new("Quit").with_id("quit").with_group(Group::app()).with_action(|| Ok(())),
            Command::new("About").with_id("about").with_group(Group::help()),
        ]);
        let ids: Vec<Option<&str>> = app.commands().ordered().iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![Some("quit"), None, Some("about")]);
        app.commands_mut().activate("quit").unwrap();
        assert!(app.commands_mut().activate("about").is_err());
    }
}
