//! # reqdeck-tree
//!
//! The tree-view side of the explorer. [`TreeProvider`] is the contract the
//! explorer store keeps in lockstep with its snapshot; [`MemoryTreeProvider`]
//! implements it as a flat node list with parent links. The [`render`]
//! module holds the pure per-item rendering rules and [`outline`] prints a
//! whole tree as indented text.

pub mod memory;
pub mod outline;
pub mod provider;
pub mod render;

pub use memory::{MemoryTreeProvider, TreeCall, TreeNode};
pub use outline::outline;
pub use provider::TreeProvider;
pub use render::{Arrow, Icon, TitleSpan, highlight_title, render_arrow};
