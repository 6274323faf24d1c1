//! # Notification Repository
//!
//! The notification center, newest first, at most 50 entries.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::keys;
use crate::store::KvStore;
use dukkan_core::notification::NotificationLog;
use dukkan_core::{Notification, NotificationType};

#[derive(Debug, Clone)]
pub struct NotificationRepository {
    store: KvStore,
}

impl NotificationRepository {
    pub fn new(store: KvStore) -> Self {
        NotificationRepository { store }
    }

    pub async fn list(&self) -> DbResult<Vec<Notification>> {
        let log: NotificationLog = self.store.get(keys::NOTIFICATIONS, NotificationLog::new()).await;
        Ok(log.into_vec())
    }

    pub async fn unread_count(&self) -> DbResult<usize> {
        let log: NotificationLog = self.store.get(keys::NOTIFICATIONS, NotificationLog::new()).await;
        Ok(log.unread_count())
    }

    /// Records a new unread notification at the top of the list.
    pub async fn add(
        &self,
        title: &str,
        message: &str,
        kind: NotificationType,
        now: DateTime<Utc>,
    ) -> DbResult<Notification> {
        debug!(title = %title, ?kind, "Adding notification");
        let notification =
            NotificationLog::compose(Uuid::new_v4().to_string(), title, message, kind, now);
        let stored = notification.clone();
        self.modify(move |log| {
            log.push(stored);
            Ok(())
        })
        .await?;
        Ok(notification)
    }

    pub async fn mark_read(&self, id: &str) -> DbResult<()> {
        self.modify(|log| {
            if log.mark_read(id) {
                Ok(())
            } else {
                Err(DbError::not_found("Notification", id))
            }
        })
        .await
    }

    pub async fn mark_all_read(&self) -> DbResult<()> {
        self.modify(|log| {
            log.mark_all_read();
            Ok(())
        })
        .await
    }

    pub async fn remove(&self, id: &str) -> DbResult<()> {
        self.modify(|log| {
            if log.remove(id) {
                Ok(())
            } else {
                Err(DbError::not_found("Notification", id))
            }
        })
        .await
    }

    pub async fn clear(&self) -> DbResult<()> {
        debug!("Clearing notifications");
        self.modify(|log| {
            log.clear();
            Ok(())
        })
        .await
    }

    async fn modify<F>(&self, change: F) -> DbResult<()>
    where
        F: FnOnce(&mut NotificationLog) -> DbResult<()>,
    {
        let mut tx = self.store.begin().await?;
        let mut log: NotificationLog = tx.load(keys::NOTIFICATIONS, NotificationLog::new()).await?;
        change(&mut log)?;
        tx.set(keys::NOTIFICATIONS, &log).await?;
        tx.commit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use dukkan_core::MAX_NOTIFICATIONS;

    async fn repo() -> (Database, NotificationRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.notifications();
        (db, repo)
    }

    #[tokio::test]
    async fn test_newest_first_and_capped() {
        let (_db, repo) = repo().await;
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            repo.add(&format!("n{}", i), "", NotificationType::Info, Utc::now())
                .await
                .unwrap();
        }

        let list = repo.list().await.unwrap();
        assert_eq!(list.len(), MAX_NOTIFICATIONS);
        assert_eq!(list[0].title, format!("n{}", MAX_NOTIFICATIONS + 4));
        assert_eq!(repo.unread_count().await.unwrap(), MAX_NOTIFICATIONS);
    }

    #[tokio::test]
    async fn test_mark_read_remove_clear() {
        let (_db, repo) = repo().await;
        let first = repo
            .add("تم الحفظ", "تم حفظ الفاتورة", NotificationType::Success, Utc::now())
            .await
            .unwrap();
        let second = repo
            .add("خطأ", "الفاتورة فارغة", NotificationType::Error, Utc::now())
            .await
            .unwrap();

        repo.mark_read(&first.id).await.unwrap();
        assert_eq!(repo.unread_count().await.unwrap(), 1);

        repo.mark_all_read().await.unwrap();
        assert_eq!(repo.unread_count().await.unwrap(), 0);

        repo.remove(&second.id).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
        assert!(matches!(
            repo.remove(&second.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));

        repo.clear().await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
