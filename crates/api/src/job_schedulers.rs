use crate::scheduler::ReminderScheduler;
use actix_web::rt::time::interval;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Fires due reminder jobs every `job_poll_interval_secs` for as long as
/// the process runs. Reminders fire at most one poll interval late.
pub fn start_reminder_job_worker(scheduler: Arc<ReminderScheduler>) {
    actix_web::rt::spawn(async move {
        let poll_interval = scheduler.context().config.job_poll_interval_secs;
        let mut interval = interval(Duration::from_secs(poll_interval));
        loop {
            interval.tick().await;

            let claimed = scheduler.run_due_jobs().await;
            if claimed > 0 {
                debug!("Processed {} reminder jobs", claimed);
            }
        }
    });
}
