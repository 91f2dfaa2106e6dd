//! 通知 Repository 的 Postgres 实现。
//!
//! mark_read / delete 在 WHERE 里带上属主条件，
//! 他人的通知 ID 命中零行，静默返回。

use application::NotificationRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{NewNotification, Notification, NotificationId, RepositoryError, UserId};
use sqlx::{query, query_as, FromRow};

use crate::db::{map_sqlx_err, DbPool};

#[derive(Debug, Clone, FromRow)]
struct DbNotification {
    id: i64,
    user_id: i64,
    message: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<DbNotification> for Notification {
    fn from(row: DbNotification) -> Self {
        Notification {
            id: NotificationId::new(row.id),
            user_id: UserId::new(row.user_id),
            message: row.message,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

pub struct PgNotificationRepository {
    pool: DbPool,
}

impl PgNotificationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, RepositoryError> {
        let row = query_as::<_, DbNotification>(
            r#"
            INSERT INTO notifications (user_id, message)
            VALUES ($1, $2)
            RETURNING id, user_id, message, is_read, created_at
            "#,
        )
        .bind(i64::from(notification.user_id))
        .bind(&notification.message)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(row.into())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Notification>, RepositoryError> {
        let rows = query_as::<_, DbNotification>(
            r#"
            SELECT id, user_id, message, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(i64::from(user_id))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user_id: UserId,
    ) -> Result<(), RepositoryError> {
        query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2")
            .bind(i64::from(id))
            .bind(i64::from(user_id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn delete(&self, id: NotificationId, user_id: UserId) -> Result<(), RepositoryError> {
        query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(i64::from(id))
            .bind(i64::from(user_id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(())
    }
}
