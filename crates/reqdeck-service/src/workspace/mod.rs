//! Workspace and organization calls outside the explorer.

pub mod service;

pub use service::WorkspaceService;
