use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use medi_reminder_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |n| n.user_id == *user_id);
        notifications.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(notifications)
    }

    async fn mark_read(
        &self,
        notification_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Notification>> {
        Ok(update_many(
            &self.notifications,
            |n| n.id == *notification_id && n.user_id == *user_id,
            |n| n.read = true,
        )
        .into_iter()
        .next())
    }
}
