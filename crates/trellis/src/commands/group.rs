use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

/// Shared group data.
#[derive(Debug)]
struct GroupInner {
    /// Display text.
    text: String,
    /// Order among sibling groups.
    order: i64,
    /// Section within the parent group. Always 0 for top-level groups.
    section: i64,
    /// Parent group.
    parent: Option<Group>,
}

/// A menu group.
///
/// Groups are immutable and cheap to clone. A child group is built from its
/// parent, so the hierarchy cannot contain cycles. Two groups are equal when
/// their key paths are equal: the `(section, order, text)` triple of every
/// level from the top-level group down.
#[derive(Clone)]
pub struct Group(Rc<GroupInner>);

impl Group {
    /// A top-level group.
    pub fn new(text: &str, order: i64) -> Self {
        Self(Rc::new(GroupInner {
            text: text.to_string(),
            order,
            section: 0,
            parent: None,
        }))
    }

    /// A group nested in this one, in `section` with `order` among its
    /// siblings.
    pub fn child(&self, text: &str, section: i64, order: i64) -> Self {
        Self(Rc::new(GroupInner {
            text: text.to_string(),
            order,
            section,
            parent: Some(self.clone()),
        }))
    }

    /// The application group, sorted first.
    pub fn app() -> Self {
        Self::new("*", -100)
    }

    /// The File group.
    pub fn file() -> Self {
        Self::new("File", -30)
    }

    /// The Edit group.
    pub fn edit() -> Self {
        Self::new("Edit", -20)
    }

    /// The View group.
    pub fn view() -> Self {
        Self::new("View", -10)
    }

    /// The Commands group.
    pub fn commands() -> Self {
        Self::new("Commands", 30)
    }

    /// The Window group.
    pub fn window() -> Self {
        Self::new("Window", 90)
    }

    /// The Help group, which always sorts last.
    pub fn help() -> Self {
        Self::new("Help", i64::MAX)
    }

    /// Display text.
    pub fn text(&self) -> &str {
        &self.0.text
    }

    /// Order among sibling groups.
    pub fn order(&self) -> i64 {
        self.0.order
    }

    /// Section within the parent group.
    pub fn section(&self) -> i64 {
        self.0.section
    }

    /// Parent group.
    pub fn parent(&self) -> Option<&Self> {
        self.0.parent.as_ref()
    }

    /// The top-level ancestor, or this group if it has no parent.
    pub fn root(&self) -> &Self {
        let mut cur = self;
        while let Some(p) = cur.parent() {
            cur = p;
        }
        cur
    }

    /// Ancestry from the top-level group down to this one.
    pub fn chain(&self) -> Vec<&Self> {
        let mut out = vec![self];
        let mut cur = self;
        while let Some(p) = cur.parent() {
            out.push(p);
            cur = p;
        }
        out.reverse();
        out
    }

    /// Number of ancestors.
    pub fn depth(&self) -> usize {
        self.chain().len() - 1
    }

    /// True if this group is a strict ancestor of `other`.
    pub fn is_parent_of(&self, other: &Self) -> bool {
        let mut cur = other.parent();
        while let Some(p) = cur {
            if p == self {
                return true;
            }
            cur = p.parent();
        }
        false
    }

    /// True if this group is a strict descendant of `other`.
    pub fn is_child_of(&self, other: &Self) -> bool {
        other.is_parent_of(self)
    }

    /// The sort key for this level.
    pub(super) fn level_key(&self) -> (i64, i64, &str) {
        (self.section(), self.order(), self.text())
    }

    /// The full key path.
    fn key(&self) -> Vec<(i64, i64, &str)> {
        self.chain().into_iter().map(Self::level_key).collect()
    }
}

impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.key() == other.key()
    }
}

impl Eq for Group {}

impl PartialOrd for Group {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Group {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Hash for Group {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path: Vec<&str> = self.chain().into_iter().map(Self::text).collect();
        write!(f, "Group({})", path.join(" > "))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy() {
        let file = Group::file();
        let recent = file.child("Recent", 1, 0);
        let deep = recent.child("Deep", 0, 0);
        assert_eq!(deep.root(), &file);
        assert!(file.is_parent_of(&deep));
        assert!(deep.is_child_of(&recent));
        assert!(!recent.is_parent_of(&file));
        assert!(!file.is_parent_of(&file));
        assert_eq!(deep.depth(), 2);
        assert_eq!(format!("{deep:?}"), "Group(File > Recent > Deep)");
    }

    #[test]
    fn equality_by_key() {
        assert_eq!(Group::file(), Group::new("File", -30));
        assert_ne!(Group::file(), Group::new("File", -29));
        assert_ne!(
            Group::file().child("A", 0, 0),
            Group::edit().child("A", 0, 0)
        );
    }

    #[test]
    fn standard_order() {
        let mut groups = vec![
            Group::help(),
            Group::window(),
            Group::commands(),
            Group::view(),
            Group::edit(),
            Group::file(),
            Group::app(),
        ];
        groups.sort();
        let names: Vec<&str> = groups.iter().map(Group::text).collect();
        assert_eq!(
            names,
            vec!["*", "File", "Edit", "View", "Commands", "Window", "Help"]
        );
        assert!(Group::new("Zzz", i64::MAX - 1) < Group::help());
    }
}
