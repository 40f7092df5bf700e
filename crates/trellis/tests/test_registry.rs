//! Tests for widget id uniqueness and lookup.

#[cfg(test)]
mod tests {
    use trellis::{Error, Widget, WidgetTree, backend::DummyBackend};

    /// A tree on the dummy backend.
    fn tree() -> WidgetTree {
        WidgetTree::new(Box::new(DummyBackend::create().1))
    }

    #[test]
    fn duplicate_id_keeps_first() {
        let mut t = tree();
        let first = t.create(Widget::label("one").with_id("dup")).unwrap();
        let err = t.create(Widget::button("two").with_id("dup")).unwrap_err();
        assert_eq!(err, Error::DuplicateIdentifier("dup".into()));
        assert_eq!(t.registry().len(), 1);
        assert_eq!(t.lookup("dup"), Ok(first));
        assert_eq!(t.get(first).unwrap().text(), Some("one"));
    }

    #[test]
    fn lookup_unknown() {
        let t = tree();
        assert_eq!(t.lookup("ghost"), Err(Error::NotFound("ghost".into())));
    }

    #[test]
    fn ids_are_reusable_after_removal() {
        let mut t = tree();
        let root = t.create(Widget::container().with_id("root")).unwrap();
        let a = t.create(Widget::label("a").with_id("a")).unwrap();
        t.add_child(root, a).unwrap();
        t.remove_subtree(a).unwrap();
        assert!(!t.registry().contains("a"));
        let again = t.create(Widget::label("a2").with_id("a")).unwrap();
        assert_eq!(t.lookup("a"), Ok(again));
    }

    #[test]
    fn detaching_keeps_registration() {
        let mut t = tree();
        let root = t.create(Widget::container().with_id("root")).unwrap();
        let a = t.create(Widget::label("a").with_id("a")).unwrap();
        t.add_child(root, a).unwrap();
        assert!(t.remove_child(root, a).unwrap());
        assert_eq!(t.lookup("a"), Ok(a));
    }

    #[test]
    fn iteration_is_insertion_ordered() {
        let mut t = tree();
        for id in ["m", "b", "x", "a"] {
            t.create(Widget::label(id).with_id(id)).unwrap();
        }
        let ids: Vec<&str> = t.registry().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["m", "b", "x", "a"]);
    }
}
