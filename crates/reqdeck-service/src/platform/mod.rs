//! Platform context: the agent preference and where it is persisted.

pub mod agent;
pub mod preferences;
pub mod store;

pub use agent::Agent;
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore};
pub use store::{AGENT_PREFERENCE_KEY, PlatformStore};
