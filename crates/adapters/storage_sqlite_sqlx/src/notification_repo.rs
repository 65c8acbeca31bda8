//! `SQLite` implementation of [`NotificationStore`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use homeguard_app::ports::NotificationStore;
use homeguard_domain::effect::Notification;
use homeguard_domain::error::{HomeGuardError, NotFoundError};
use homeguard_domain::id::NotificationId;

use crate::error::StorageError;
use crate::store::{SqliteStore, decode_err, decode_ts, encode_ts};

struct Wrapper(Notification);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let category: String = row.try_get("category")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Notification {
            id: id.parse().map_err(decode_err)?,
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            category: category.parse().map_err(decode_err)?,
            created_at: decode_ts(&created_at)?,
            read: row.try_get("read")?,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO notifications (id, title, message, category, created_at, read)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_RECENT: &str =
    "SELECT * FROM notifications ORDER BY created_at DESC, rowid DESC LIMIT ?";
const MARK_READ: &str = "UPDATE notifications SET read = 1 WHERE id = ?";
const DELETE_ALL: &str = "DELETE FROM notifications";

impl NotificationStore for SqliteStore {
    async fn store(&self, notification: Notification) -> Result<Notification, HomeGuardError> {
        sqlx::query(INSERT)
            .bind(notification.id.to_string())
            .bind(&notification.title)
            .bind(&notification.message)
            .bind(notification.category.as_str())
            .bind(encode_ts(notification.created_at))
            .bind(notification.read)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(notification)
    }

    async fn recent(&self, limit: u32) -> Result<Vec<Notification>, HomeGuardError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RECENT)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn mark_read(&self, id: NotificationId) -> Result<(), HomeGuardError> {
        let result = sqlx::query(MARK_READ)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(NotFoundError {
                entity: "Notification",
                id: id.to_string(),
            }
            .into());
        }

        Ok(())
    }

    async fn clear_notifications(&self) -> Result<(), HomeGuardError> {
        sqlx::query(DELETE_ALL)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory_store;
    use chrono::TimeDelta;
    use homeguard_domain::effect::NotificationCategory;
    use homeguard_domain::time::now;

    fn notification(title: &str, offset_secs: i64) -> Notification {
        Notification::new(
            title,
            "details",
            NotificationCategory::Fire,
            now() + TimeDelta::seconds(offset_secs),
        )
    }

    #[tokio::test]
    async fn should_list_newest_first_within_limit() {
        let store = memory_store().await;
        store.store(notification("old", 0)).await.unwrap();
        store.store(notification("mid", 1)).await.unwrap();
        store.store(notification("new", 2)).await.unwrap();

        let recent = store.recent(2).await.unwrap();
        let titles: Vec<&str> = recent.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid"]);
    }

    #[tokio::test]
    async fn should_mark_notification_read() {
        let store = memory_store().await;
        let stored = store.store(notification("fire", 0)).await.unwrap();
        assert!(!stored.read);

        store.mark_read(stored.id).await.unwrap();

        assert!(store.recent(1).await.unwrap()[0].read);
    }

    #[tokio::test]
    async fn should_return_not_found_when_marking_unknown_notification() {
        let store = memory_store().await;
        let result = store.mark_read(NotificationId::new()).await;
        assert!(matches!(result, Err(HomeGuardError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_remove_every_notification_when_cleared() {
        let store = memory_store().await;
        store.store(notification("fire", 0)).await.unwrap();

        store.clear_notifications().await.unwrap();

        assert!(store.recent(10).await.unwrap().is_empty());
    }
}
