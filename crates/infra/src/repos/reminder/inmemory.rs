use super::{sort_for_listing, IReminderRepo};
use crate::repos::shared::inmemory_repo::*;
use medi_reminder_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders))
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.reminders, |r| r.user_id == *user_id);
        sort_for_listing(&mut reminders);
        Ok(reminders)
    }

    async fn find_unsent(&self) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| !r.is_spent()))
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        Ok(delete(reminder_id, &self.reminders))
    }

    async fn mark_fired(
        &self,
        reminder_id: &ID,
        fired_at: i64,
    ) -> anyhow::Result<Option<Reminder>> {
        let updated = update_many(
            &self.reminders,
            |r| r.id == *reminder_id && !r.is_spent(),
            |r| r.mark_fired(fired_at),
        );
        Ok(updated.into_iter().next())
    }
}
