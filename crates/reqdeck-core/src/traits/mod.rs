//! Collaborator traits defined in `reqdeck-core` and implemented by other crates.

pub mod notifier;
pub mod preferences;

pub use notifier::{Labels, Notifier};
pub use preferences::PreferenceStore;
