use crate::shared::entity::{Entity, ID};

/// A pending firing of a `Reminder`.
///
/// There is at most one `ReminderJob` per `Reminder`: storing a new job
/// for the same reminder replaces the existing one, including its `id`.
/// The `id` therefore identifies one specific scheduling of the reminder,
/// which is what a worker uses to complete the job it claimed without
/// touching a job that replaced it in the meantime.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderJob {
    pub id: ID,
    pub reminder_id: ID,
    /// Timestamp millis at which the reminder should fire
    pub run_at: i64,
    /// While set and in the future the job is claimed by a worker
    /// and will not be handed out again.
    pub locked_until: Option<i64>,
}

impl ReminderJob {
    pub fn new(reminder_id: ID, run_at: i64) -> Self {
        Self {
            id: Default::default(),
            reminder_id,
            run_at,
            locked_until: None,
        }
    }

    pub fn is_claimable(&self, now: i64) -> bool {
        self.run_at <= now && self.locked_until.map(|until| until < now).unwrap_or(true)
    }
}

impl Entity for ReminderJob {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn is_claimable_when_due_and_not_leased() {
        let mut job = ReminderJob::new(ID::default(), 100);
        assert!(!job.is_claimable(99));
        assert!(job.is_claimable(100));

        job.locked_until = Some(200);
        assert!(!job.is_claimable(150));
        assert!(!job.is_claimable(200));
        assert!(job.is_claimable(201));
    }
}
