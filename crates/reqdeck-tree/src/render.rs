//! Per-item rendering rules for the explorer tree.
//!
//! Both functions are pure: the arrow depends only on the node kind, its
//! expansion state and (for requests) the method label; the title split
//! depends only on the title and the live search term.

use std::fmt;

use serde::{Deserialize, Serialize};

use reqdeck_entity::NodeKind;

/// Icon drawn next to a branch node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Icon {
    /// Filled folder, collection collapsed.
    CollectionClosed,
    /// Filled open folder, collection expanded.
    CollectionOpen,
    /// Outline folder, folder collapsed.
    FolderClosed,
    /// Outline open folder, folder expanded.
    FolderOpen,
}

/// What is drawn before an item's title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arrow {
    /// A collection or folder: expansion triangle plus folder icon.
    Branch {
        /// Whether the triangle points down.
        expanded: bool,
        /// Folder icon variant.
        icon: Icon,
    },
    /// A request: its uppercased method label.
    Method(String),
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Branch { expanded, icon } => {
                let triangle = if *expanded { '▾' } else { '▸' };
                let glyph = match icon {
                    Icon::CollectionClosed | Icon::FolderClosed => "[+]",
                    Icon::CollectionOpen | Icon::FolderOpen => "[-]",
                };
                write!(f, "{triangle} {glyph}")
            }
            Self::Method(label) => f.write_str(label),
        }
    }
}

/// Arrow for a node. `method` is only read for requests.
pub fn render_arrow(kind: NodeKind, expanded: bool, method: Option<&str>) -> Arrow {
    match kind {
        NodeKind::Collection => Arrow::Branch {
            expanded,
            icon: if expanded {
                Icon::CollectionOpen
            } else {
                Icon::CollectionClosed
            },
        },
        NodeKind::Folder => Arrow::Branch {
            expanded,
            icon: if expanded {
                Icon::FolderOpen
            } else {
                Icon::FolderClosed
            },
        },
        NodeKind::Request => Arrow::Method(method.unwrap_or_default().to_uppercase()),
    }
}

/// A piece of a rendered title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleSpan {
    /// Text shown as is.
    Plain(String),
    /// Text matching the search term.
    Highlight(String),
}

impl TitleSpan {
    /// The span's text.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) | Self::Highlight(text) => text,
        }
    }
}

/// Split `title` around the first case-insensitive match of `search`.
///
/// Without a search term, or when nothing matches, the whole title is one
/// plain span. Empty leading or trailing spans are omitted.
pub fn highlight_title(title: &str, search: Option<&str>) -> Vec<TitleSpan> {
    let found = search
        .filter(|term| !term.is_empty())
        .and_then(|term| find_case_insensitive(title, term));

    let Some((start, end)) = found else {
        return vec![TitleSpan::Plain(title.to_string())];
    };

    let mut spans = Vec::with_capacity(3);
    if start > 0 {
        spans.push(TitleSpan::Plain(title[..start].to_string()));
    }
    spans.push(TitleSpan::Highlight(title[start..end].to_string()));
    if end < title.len() {
        spans.push(TitleSpan::Plain(title[end..].to_string()));
    }
    spans
}

/// Byte range of the first case-insensitive occurrence of `needle`.
fn find_case_insensitive(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    haystack.char_indices().find_map(|(start, _)| {
        let mut rest = haystack[start..].chars();
        let mut end = start;
        for wanted in needle.chars() {
            let got = rest.next()?;
            if !got.to_lowercase().eq(wanted.to_lowercase()) {
                return None;
            }
            end += got.len_utf8();
        }
        Some((start, end))
    })
}
