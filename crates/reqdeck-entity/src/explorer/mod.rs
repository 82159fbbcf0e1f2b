//! Explorer aggregates: the in-memory snapshot and the bulk fetch payload.

pub mod artifacts;
pub mod snapshot;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use artifacts::ExplorerArtifacts;
pub use snapshot::ExplorerSnapshot;

/// The three kinds of node shown in the explorer tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A collection (top level).
    Collection,
    /// A folder inside a collection or another folder.
    Folder,
    /// A request (leaf).
    Request,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collection => write!(f, "collection"),
            Self::Folder => write!(f, "folder"),
            Self::Request => write!(f, "request"),
        }
    }
}
