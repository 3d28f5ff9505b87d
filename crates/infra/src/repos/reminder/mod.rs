mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

use medi_reminder_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// All `Reminder`s of the user, latest `scheduled_at` first and recurring ones last
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>>;
    /// Every `Reminder` that may still fire: unsent one-offs and all recurring ones
    async fn find_unsent(&self) -> anyhow::Result<Vec<Reminder>>;
    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// Records a firing by setting only `sent` (one-off) or `last_run`
    /// (recurring), leaving fields the owner may have edited meanwhile
    /// untouched. Returns the stored `Reminder` after the write, or `None` if
    /// it is gone or is a one-off that already fired.
    async fn mark_fired(&self, reminder_id: &ID, fired_at: i64)
        -> anyhow::Result<Option<Reminder>>;
}

/// Order used when listing the reminders of a user
pub(crate) fn sort_for_listing(reminders: &mut Vec<Reminder>) {
    reminders.sort_by(|a, b| match (a.scheduled_at(), b.scheduled_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.created.cmp(&a.created),
    });
}

#[cfg(test)]
mod tests {
    use crate::MediContext;
    use medi_reminder_domain::{
        RecurrenceType, Reminder, ReminderScheduleInput, ReminderUpdate, ID,
    };

    fn one_off(user_id: &ID, scheduled_at: i64) -> Reminder {
        Reminder::new(
            user_id.clone(),
            None,
            "Aspirin".into(),
            None,
            ReminderScheduleInput {
                scheduled_at: Some(scheduled_at),
                ..Default::default()
            },
            0,
        )
        .unwrap()
    }

    fn daily(user_id: &ID) -> Reminder {
        Reminder::new(
            user_id.clone(),
            None,
            "Vitamin D".into(),
            None,
            ReminderScheduleInput {
                is_recurring: true,
                recurrence_type: Some(RecurrenceType::Daily),
                time: Some("08:00".into()),
                ..Default::default()
            },
            0,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn crud() {
        let ctx = MediContext::create_inmemory();
        let user_id = ID::default();
        let mut reminder = one_off(&user_id, 1000);

        ctx.repos.reminders.insert(&reminder).await.unwrap();
        let found = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(found, Some(reminder.clone()));

        reminder.mark_fired(1000);
        ctx.repos.reminders.save(&reminder).await.unwrap();
        let found = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert!(found.sent);

        let deleted = ctx.repos.reminders.delete(&reminder.id).await.unwrap();
        assert_eq!(deleted.map(|r| r.id), Some(reminder.id.clone()));
        assert!(ctx.repos.reminders.find(&reminder.id).await.unwrap().is_none());
        assert!(ctx.repos.reminders.delete(&reminder.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn marking_fired_keeps_concurrent_edits() {
        let ctx = MediContext::create_inmemory();
        let reminder = daily(&ID::default());
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        // The owner edits the reminder after it was loaded for firing
        let mut edited = reminder.clone();
        edited
            .apply_update(ReminderUpdate {
                time: Some("20:30".into()),
                medicine_name: Some("Vitamin C".into()),
                ..Default::default()
            })
            .unwrap();
        ctx.repos.reminders.save(&edited).await.unwrap();

        let fired = ctx
            .repos
            .reminders
            .mark_fired(&reminder.id, 5000)
            .await
            .unwrap()
            .expect("Reminder to still exist");
        let stored = ctx.repos.reminders.find(&reminder.id).await.unwrap().unwrap();
        assert_eq!(fired, stored);
        assert_eq!(stored.last_run, Some(5000));
        assert_eq!(stored.medicine_name, "Vitamin C");
        assert_eq!(stored.recurrence().map(|r| r.time.as_str()), Some("20:30"));
        assert!(!stored.sent);
    }

    #[tokio::test]
    async fn marking_fired_matches_only_pending_reminders() {
        let ctx = MediContext::create_inmemory();
        let reminder = one_off(&ID::default(), 1000);
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let fired = ctx.repos.reminders.mark_fired(&reminder.id, 1000).await.unwrap();
        assert!(fired.map(|r| r.sent).unwrap_or(false));
        // A second firing of the same one-off does not match
        assert!(ctx
            .repos
            .reminders
            .mark_fired(&reminder.id, 2000)
            .await
            .unwrap()
            .is_none());

        ctx.repos.reminders.delete(&reminder.id).await.unwrap();
        assert!(ctx
            .repos
            .reminders
            .mark_fired(&reminder.id, 3000)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn lists_reminders_of_user_latest_first() {
        let ctx = MediContext::create_inmemory();
        let user_id = ID::default();
        let early = one_off(&user_id, 1000);
        let recurring = daily(&user_id);
        let late = one_off(&user_id, 5000);
        let other_user = one_off(&ID::default(), 3000);

        for reminder in [&early, &recurring, &late, &other_user] {
            ctx.repos.reminders.insert(reminder).await.unwrap();
        }

        let ids = ctx
            .repos
            .reminders
            .find_by_user(&user_id)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![late.id, early.id, recurring.id]);
    }

    #[tokio::test]
    async fn finds_unsent_reminders() {
        let ctx = MediContext::create_inmemory();
        let user_id = ID::default();
        let mut sent = one_off(&user_id, 1000);
        sent.mark_fired(1000);
        let pending = one_off(&user_id, 2000);
        let mut recurring = daily(&user_id);
        recurring.mark_fired(1000);

        for reminder in [&sent, &pending, &recurring] {
            ctx.repos.reminders.insert(reminder).await.unwrap();
        }

        let mut unsent = ctx
            .repos
            .reminders
            .find_unsent()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect::<Vec<_>>();
        unsent.sort_by_key(|id| id.to_string());
        let mut expected = vec![pending.id, recurring.id];
        expected.sort_by_key(|id| id.to_string());
        assert_eq!(unsent, expected);
    }
}
