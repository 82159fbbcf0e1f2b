//! Text rendering of a whole tree, fully expanded.

use std::fmt::Write;

use crate::memory::{MemoryTreeProvider, TreeNode};
use crate::render::{TitleSpan, highlight_title, render_arrow};

/// Render `tree` depth-first, two spaces of indent per level. Search
/// matches are wrapped in brackets.
pub fn outline(tree: &MemoryTreeProvider, search: Option<&str>) -> String {
    let mut out = String::new();
    for root in tree.roots() {
        write_node(tree, &root, 0, search, &mut out);
    }
    out
}

fn write_node(
    tree: &MemoryTreeProvider,
    node: &TreeNode,
    depth: usize,
    search: Option<&str>,
    out: &mut String,
) {
    let arrow = render_arrow(node.kind, true, node.method.as_deref());
    let title: String = highlight_title(&node.title, search)
        .iter()
        .map(|span| match span {
            TitleSpan::Plain(text) => text.clone(),
            TitleSpan::Highlight(text) => format!("[{text}]"),
        })
        .collect();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{:indent$}{arrow} {title}", "", indent = depth * 2);

    for child in tree.children_of(node.id) {
        write_node(tree, &child, depth + 1, search, out);
    }
}
