use std::cmp::Ordering;

use super::{Command, Group};

/// One entry in a rendered command sequence.
#[derive(Debug, Clone, Copy)]
pub enum MenuItem<'a> {
    /// A command.
    Command(&'a Command),
    /// Separates two top-level groups.
    GroupBreak,
    /// Separates two sections within a group.
    SectionBreak,
}

impl<'a> MenuItem<'a> {
    /// The command id, for command items.
    pub fn id(&self) -> Option<&'a str> {
        match *self {
            Self::Command(c) => Some(c.id()),
            Self::GroupBreak | Self::SectionBreak => None,
        }
    }
}

impl PartialEq for MenuItem<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Command(a), Self::Command(b)) => a.id() == b.id(),
            (Self::GroupBreak, Self::GroupBreak) | (Self::SectionBreak, Self::SectionBreak) => true,
            _ => false,
        }
    }
}

impl Eq for MenuItem<'_> {}

/// Key of the implicit top-level group that holds ungrouped commands. It sorts
/// as a section 0, order 0 group, ahead of named groups with the same order.
const ROOT_LEVEL: (i64, i64, &str) = (0, 0, "");

/// An owned copy of one level of a key path.
fn owned((section, order, text): (i64, i64, &str)) -> (i64, i64, String) {
    (section, order, text.to_string())
}

/// The key of a command: its group path followed by its own
/// `(section, order, text)`, with the id as a final tiebreak.
fn compare(a: &Command, b: &Command) -> Ordering {
    let path = |c: &Command| -> Vec<(i64, i64, String)> {
        let mut key: Vec<(i64, i64, String)> = match c.group() {
            Some(g) => g.chain().into_iter().map(|l| owned(l.level_key())).collect(),
            None => vec![owned(ROOT_LEVEL)],
        };
        key.push((c.section(), c.order(), c.text().to_string()));
        key
    };
    path(a).cmp(&path(b)).then_with(|| a.id().cmp(b.id()))
}

/// Whether a break separates `prev` and `next`, which are adjacent in sorted
/// order.
fn separator(prev: &Command, next: &Command) -> Option<MenuItem<'static>> {
    let prev_chain = prev.group().map(Group::chain).unwrap_or_default();
    let next_chain = next.group().map(Group::chain).unwrap_or_default();

    if prev_chain.first() != next_chain.first() {
        return Some(MenuItem::GroupBreak);
    }

    // The first level where the two paths diverge. At that level each side is
    // either a subgroup or the command itself; compare their sections.
    let depth = prev_chain
        .iter()
        .zip(&next_chain)
        .take_while(|(a, b)| a == b)
        .count();
    let section_at = |chain: &[&Group], cmd: &Command| {
        chain.get(depth).map_or(cmd.section(), |g| g.section())
    };
    if section_at(prev_chain.as_slice(), prev) != section_at(next_chain.as_slice(), next) {
        return Some(MenuItem::SectionBreak);
    }
    None
}

/// Order commands into a render-ready sequence.
///
/// Commands sort by top-level group, then by each nested group, then by
/// section, order and text. A group break separates commands whose top-level
/// groups differ; otherwise a section break separates commands whose entries
/// at the first diverging level of the menu hierarchy are in different
/// sections. The result does not depend on the input order.
pub fn ordered<'a>(commands: impl IntoIterator<Item = &'a Command>) -> Vec<MenuItem<'a>> {
    let mut sorted: Vec<&Command> = commands.into_iter().collect();
    sorted.sort_by(|a, b| compare(a, b));

    let mut out = Vec::with_capacity(sorted.len() * 2);
    let mut prev: Option<&Command> = None;
    for cmd in sorted {
        if let Some(p) = prev
            && let Some(sep) = separator(p, cmd)
        {
            out.push(sep);
        }
        out.push(MenuItem::Command(cmd));
        prev = Some(cmd);
    }
    out
}
