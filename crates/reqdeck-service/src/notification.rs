//! Notifier implementations.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use reqdeck_core::traits::notifier::{Labels, Notifier};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    /// A completed action.
    Success,
    /// A failure the user should see.
    Alert,
}

/// A notification as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Message text.
    pub message: String,
    /// Attached labels.
    pub labels: Labels,
    /// When it was emitted.
    pub created_at: DateTime<Utc>,
}

/// Notifier that writes to the log. Used by headless front ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str, labels: &Labels) {
        info!(?labels, "{message}");
    }

    fn alert(&self, message: &str, labels: &Labels) {
        warn!(?labels, "{message}");
    }
}

/// Notifier that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    entries: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, oldest first.
    pub fn all(&self) -> Vec<Notification> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Alert notifications only.
    pub fn alerts(&self) -> Vec<Notification> {
        self.by_level(NotificationLevel::Alert)
    }

    /// Success notifications only.
    pub fn successes(&self) -> Vec<Notification> {
        self.by_level(NotificationLevel::Success)
    }

    fn by_level(&self, level: NotificationLevel) -> Vec<Notification> {
        self.all().into_iter().filter(|n| n.level == level).collect()
    }

    fn push(&self, level: NotificationLevel, message: &str, labels: &Labels) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Notification {
                level,
                message: message.to_string(),
                labels: labels.clone(),
                created_at: Utc::now(),
            });
    }
}

impl Notifier for MemoryNotifier {
    fn success(&self, message: &str, labels: &Labels) {
        self.push(NotificationLevel::Success, message, labels);
    }

    fn alert(&self, message: &str, labels: &Labels) {
        self.push(NotificationLevel::Alert, message, labels);
    }
}
