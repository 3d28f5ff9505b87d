mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;

use medi_reminder_domain::{Notification, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// Notifications of the user, newest first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>>;
    /// Marks the notification as read if it belongs to the user and returns it
    async fn mark_read(
        &self,
        notification_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Notification>>;
}
