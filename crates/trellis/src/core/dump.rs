use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{NodeId, WidgetTree, error::Result};

/// Traverses a tree of widgets and returns a string showing ids, styles,
/// intrinsic hints and resolved frames for each node. This is a debug
/// function.
pub fn dump(tree: &WidgetTree, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, tree, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Helper to write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(buffer: &mut Buffer, tree: &WidgetTree, node_id: NodeId, level: usize) -> Result<()> {
    let node = tree.get(node_id)?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.id())?;
    buffer.reset()?;
    write!(buffer, " ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    write!(buffer, "[{}]", node.kind().name())?;
    buffer.reset()?;
    if let Some(text) = node.text() {
        write!(buffer, " {text:?}")?;
    }
    writeln!(buffer)?;

    write_field(buffer, &indent, "style:", &node.style().to_string())?;
    if let Some(hint) = node.intrinsic() {
        write_field(buffer, &indent, "intrinsic:", &hint.to_string())?;
    }
    match node.layout() {
        Some(l) => write_field(buffer, &indent, "frame:", &l.frame.to_string())?,
        None => write_field(buffer, &indent, "frame:", "unresolved")?,
    }

    for child in node.children() {
        dump_node(buffer, tree, *child, level + 1)?;
    }
    Ok(())
}
