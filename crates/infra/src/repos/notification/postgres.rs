use super::INotificationRepo;
use medi_reminder_domain::{Notification, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    title: String,
    message: String,
    read: bool,
    created: i64,
}

impl From<NotificationRaw> for Notification {
    fn from(raw: NotificationRaw) -> Self {
        Self {
            id: raw.notification_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            message: raw.message,
            read: raw.read,
            created: raw.created,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, user_uid, title, message, read, created)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.user_id.inner_ref())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.read)
        .bind(notification.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let notifications: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1
            ORDER BY n.created DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications.into_iter().map(|n| n.into()).collect())
    }

    async fn mark_read(
        &self,
        notification_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Notification>> {
        let notification: Option<NotificationRaw> = sqlx::query_as(
            r#"
            UPDATE notifications SET read = true
            WHERE notification_uid = $1 AND user_uid = $2
            RETURNING *
            "#,
        )
        .bind(notification_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(notification.map(|n| n.into()))
    }
}
