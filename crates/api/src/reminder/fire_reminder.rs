use crate::shared::usecase::UseCase;
use medi_reminder_domain::{
    next_occurrence, Message, Notification, ReminderJob, ID, REMINDER_NOTIFICATION_TITLE,
};
use medi_reminder_infra::MediContext;
use tracing::{error, info, warn};

/// The next occurrence of a recurring reminder is searched from slightly
/// after the firing so that the occurrence that just fired is not found again
const NEXT_OCCURRENCE_OFFSET: i64 = 1000;

/// Delivers a due `Reminder` as an in-app `Message` and `Notification` to
/// its owner. Safe to run more than once for the same occurrence of a one-off
/// reminder, which is what makes at least once job delivery acceptable.
#[derive(Debug)]
pub struct FireReminderUseCase {
    pub reminder_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum FireOutcome {
    Fired,
    /// The reminder was cancelled after it got scheduled
    ReminderGone,
    /// The one-off reminder has already fired
    AlreadySent,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for FireReminderUseCase {
    type Response = FireOutcome;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MediContext) -> Result<Self::Response, Self::Errors> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => {
                info!(
                    "Reminder: {} was removed before it fired, nothing to do",
                    self.reminder_id
                );
                return Ok(FireOutcome::ReminderGone);
            }
            Err(e) => {
                error!("Unable to load reminder to fire. Err: {:?}", e);
                return Err(UseCaseErrors::StorageError);
            }
        };
        if reminder.is_spent() {
            return Ok(FireOutcome::AlreadySent);
        }

        let now = ctx.sys.get_timestamp_millis();
        let content = reminder.content();
        let message = Message::new(
            reminder.user_id.clone(),
            reminder.user_id.clone(),
            content.clone(),
            now,
        );
        let notification = Notification::new(
            reminder.user_id.clone(),
            REMINDER_NOTIFICATION_TITLE.into(),
            content,
            now,
        );

        ctx.repos
            .messages
            .insert(&message)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;
        ctx.repos
            .notifications
            .insert(&notification)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        // Only the firing state is written so that edits made by the owner
        // since the reminder was loaded survive
        let reminder = match ctx.repos.reminders.mark_fired(&reminder.id, now).await {
            Ok(Some(reminder)) => reminder,
            Ok(None) => {
                info!(
                    "Reminder: {} was removed or already fired while firing, not scheduling it again",
                    self.reminder_id
                );
                return Ok(FireOutcome::Fired);
            }
            Err(e) => {
                error!("Unable to record firing of reminder. Err: {:?}", e);
                return Err(UseCaseErrors::StorageError);
            }
        };

        if reminder.is_recurring() {
            let from = now + NEXT_OCCURRENCE_OFFSET;
            match next_occurrence(&reminder, from, &ctx.config.timezone) {
                Some(run_at) => {
                    let job = ReminderJob::new(reminder.id.clone(), run_at);
                    // The firing itself succeeded, so a failure here must not
                    // cause it to be delivered again
                    if let Err(e) = ctx.repos.reminder_jobs.upsert(&job).await {
                        error!(
                            "Unable to schedule the next occurrence of reminder: {}. It stays dormant until rescheduled. Err: {:?}",
                            reminder.id, e
                        );
                    }
                }
                None => warn!(
                    "Recurring reminder: {} has no next occurrence and becomes dormant",
                    reminder.id
                ),
            }
        }

        Ok(FireOutcome::Fired)
    }
}
