//! Explorer state store and its progress tracking.

pub mod progress;
pub mod store;

pub use progress::ProgressGuard;
pub use store::ExplorerStore;
