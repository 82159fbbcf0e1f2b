//! Notification surface used to tell the user about outcomes.

use std::collections::BTreeMap;

/// Free-form labels attached to a notification (e.g. `operation`).
pub type Labels = BTreeMap<String, String>;

/// Fire-and-forget user notifications.
///
/// Implementations must not block; nothing is returned to the caller.
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Report a successful outcome.
    fn success(&self, message: &str, labels: &Labels);

    /// Report a failure the user should see.
    fn alert(&self, message: &str, labels: &Labels);
}
