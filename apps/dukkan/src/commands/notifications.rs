//! # Notification Center Commands
//!
//! Newest first, at most 50 kept.

use chrono::Utc;
use dukkan_core::{Notification, NotificationType};
use tracing::debug;

use crate::error::ApiError;
use crate::state::DbState;

pub async fn list_notifications(db: &DbState) -> Result<Vec<Notification>, ApiError> {
    debug!("list_notifications command");
    Ok(db.inner().notifications().list().await?)
}

pub async fn unread_count(db: &DbState) -> Result<usize, ApiError> {
    Ok(db.inner().notifications().unread_count().await?)
}

/// Records a notification raised by the front end itself.
pub async fn add_notification(
    db: &DbState,
    title: &str,
    message: &str,
    kind: NotificationType,
) -> Result<Notification, ApiError> {
    debug!(title = %title, ?kind, "add_notification command");
    if title.trim().is_empty() {
        return Err(ApiError::validation("title is required"));
    }
    Ok(db
        .inner()
        .notifications()
        .add(title, message, kind, Utc::now())
        .await?)
}

pub async fn mark_notification_read(db: &DbState, id: &str) -> Result<(), ApiError> {
    debug!(id = %id, "mark_notification_read command");
    Ok(db.inner().notifications().mark_read(id).await?)
}

pub async fn mark_all_notifications_read(db: &DbState) -> Result<(), ApiError> {
    debug!("mark_all_notifications_read command");
    Ok(db.inner().notifications().mark_all_read().await?)
}

pub async fn remove_notification(db: &DbState, id: &str) -> Result<(), ApiError> {
    debug!(id = %id, "remove_notification command");
    Ok(db.inner().notifications().remove(id).await?)
}

pub async fn clear_notifications(db: &DbState) -> Result<(), ApiError> {
    debug!("clear_notifications command");
    Ok(db.inner().notifications().clear().await?)
}
