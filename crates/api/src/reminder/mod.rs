mod create_reminder;
mod delete_reminder;
pub mod fire_reminder;
mod get_my_reminders;
mod get_next_reminder;
mod get_reminder;
mod update_reminder;

use crate::scheduler::{ReminderScheduler, ScheduleOutcome};
use actix_web::web;
use create_reminder::create_reminder_controller;
use delete_reminder::delete_reminder_controller;
use get_my_reminders::get_my_reminders_controller;
use get_next_reminder::get_next_reminder_controller;
use get_reminder::get_reminder_controller;
use medi_reminder_domain::Reminder;
use tracing::warn;
use update_reminder::update_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/reminders", web::post().to(create_reminder_controller));
    // Registered before "/reminders/{reminder_id}" so that they are not taken as ids
    cfg.route("/reminders/my", web::get().to(get_my_reminders_controller));
    cfg.route("/reminders/next", web::get().to(get_next_reminder_controller));

    cfg.route(
        "/reminders/{reminder_id}",
        web::get().to(get_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::put().to(update_reminder_controller),
    );
    cfg.route(
        "/reminders/{reminder_id}",
        web::delete().to(delete_reminder_controller),
    );
}

/// A stored `Reminder` together with the result of scheduling it
#[derive(Debug)]
pub struct ScheduledReminder {
    pub reminder: Reminder,
    pub next_occurrence: Option<i64>,
    pub scheduling_warning: Option<String>,
}

/// (Re)schedules a `Reminder` that has already been stored.
///
/// Scheduling failures never undo the stored mutation. They are logged
/// and reported back as a warning, and the startup reconciliation picks
/// the reminder up again.
async fn schedule_stored_reminder(
    scheduler: &ReminderScheduler,
    reminder: Reminder,
    reschedule: bool,
) -> ScheduledReminder {
    let res = if reschedule {
        scheduler.reschedule_reminder(&reminder).await
    } else {
        scheduler.schedule_reminder(&reminder).await
    };

    match res {
        Ok(ScheduleOutcome::Scheduled(run_at)) => ScheduledReminder {
            reminder,
            next_occurrence: Some(run_at),
            scheduling_warning: None,
        },
        Ok(ScheduleOutcome::FiredImmediately) => {
            // Return the reminder as it is after firing
            let reminder = match scheduler.context().repos.reminders.find(&reminder.id).await {
                Ok(Some(fired)) => fired,
                _ => reminder,
            };
            ScheduledReminder {
                reminder,
                next_occurrence: None,
                scheduling_warning: None,
            }
        }
        Ok(ScheduleOutcome::Dormant) => {
            let scheduling_warning = if reminder.is_recurring() {
                Some("The reminder has no upcoming occurrence and will not fire".to_string())
            } else {
                None
            };
            ScheduledReminder {
                reminder,
                next_occurrence: None,
                scheduling_warning,
            }
        }
        Err(e) => {
            warn!("Reminder: {} was stored but not scheduled: {:?}", reminder.id, e);
            ScheduledReminder {
                reminder,
                next_occurrence: None,
                scheduling_warning: Some(e.to_string()),
            }
        }
    }
}
