//! # Notification Log
//!
//! Newest first, capped at [`MAX_NOTIFICATIONS`].
//!
//! ```text
//! push(n51) ──► [n51, n50, ..., n2]     n1 falls off the end
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Notification, NotificationType};
use crate::MAX_NOTIFICATIONS;

/// The stored list of notifications. Serializes as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationLog(Vec<Notification>);

impl NotificationLog {
    pub fn new() -> Self {
        NotificationLog::default()
    }

    /// Builds a fresh, unread notification.
    pub fn compose(
        id: String,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationType,
        timestamp: DateTime<Utc>,
    ) -> Notification {
        Notification {
            id,
            title: title.into(),
            message: message.into(),
            kind,
            read: false,
            timestamp,
        }
    }

    /// Prepends and drops anything beyond the cap.
    pub fn push(&mut self, notification: Notification) {
        self.0.insert(0, notification);
        self.0.truncate(MAX_NOTIFICATIONS);
    }

    /// Returns false if no notification has that id.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.0.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.0 {
            n.read = true;
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|n| n.id != id);
        self.0.len() != before
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn unread_count(&self) -> usize {
        self.0.iter().filter(|n| !n.read).count()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Notification] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Notification> {
        self.0
    }
}
