//! # reqdeck-service
//!
//! Client-side services for Reqdeck. The [`ExplorerStore`] is the single
//! source of truth for a workspace's collections, folders and requests and
//! keeps a registered tree provider in lockstep with it. The other services
//! cover what the explorer leans on: environments, workspace and
//! organization calls, the platform agent preference, and notifications.
//!
//! Services follow constructor injection: all collaborators are provided
//! at construction time via `Arc` references.

pub mod environment;
pub mod explorer;
pub mod notification;
pub mod platform;
pub mod workspace;

pub use environment::EnvironmentStore;
pub use explorer::ExplorerStore;
pub use notification::{LogNotifier, MemoryNotifier, Notification, NotificationLevel};
pub use platform::{Agent, FilePreferenceStore, MemoryPreferenceStore, PlatformStore};
pub use workspace::WorkspaceService;
