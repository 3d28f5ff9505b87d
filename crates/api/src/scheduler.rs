use crate::{
    reminder::fire_reminder::{FireOutcome, FireReminderUseCase},
    shared::usecase::execute,
};
use futures::future::join_all;
use medi_reminder_domain::{next_occurrence, Reminder, ReminderJob, ID};
use medi_reminder_infra::MediContext;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleOutcome {
    /// A pending job fires the reminder at the given timestamp
    Scheduled(i64),
    /// The reminder was an overdue one-off and has been fired right away
    FiredImmediately,
    /// There is nothing left to fire, so no job is pending
    Dormant,
}

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Unable to access the reminder store: {0}")]
    Storage(anyhow::Error),
    #[error("Unable to fire the overdue reminder. It will be retried by the job worker")]
    Firing,
}

/// Counts of what happened to each reminder during a `reconcile`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReconcileSummary {
    pub scheduled: usize,
    pub fired: usize,
    pub dormant: usize,
    pub failed: usize,
}

/// Keeps exactly one pending `ReminderJob` for every `Reminder` that can
/// still fire, and fires the jobs that are due.
///
/// Jobs are persisted through the job repository of the context, so
/// several processes may share the same store. Delivery is at least once,
/// duplicates are absorbed by the `FireReminderUseCase`.
pub struct ReminderScheduler {
    ctx: MediContext,
}

impl std::fmt::Debug for ReminderScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReminderScheduler")
            .field("timezone", &self.ctx.config.timezone)
            .finish()
    }
}

impl ReminderScheduler {
    pub fn new(ctx: MediContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &MediContext {
        &self.ctx
    }

    /// Installs the job for the next occurrence of the reminder, replacing
    /// any pending job of it. An overdue one-off reminder is fired right away.
    #[tracing::instrument(name = "Scheduling reminder", skip(self, reminder), fields(reminder_id = %reminder.id))]
    pub async fn schedule_reminder(
        &self,
        reminder: &Reminder,
    ) -> Result<ScheduleOutcome, SchedulingError> {
        let now = self.ctx.sys.get_timestamp_millis();

        if reminder.is_overdue(now) {
            return self.fire_overdue(reminder).await;
        }

        match next_occurrence(reminder, now, &self.ctx.config.timezone) {
            Some(run_at) => {
                let job = ReminderJob::new(reminder.id.clone(), run_at);
                self.ctx
                    .repos
                    .reminder_jobs
                    .upsert(&job)
                    .await
                    .map_err(SchedulingError::Storage)?;
                Ok(ScheduleOutcome::Scheduled(run_at))
            }
            None => {
                if reminder.is_recurring() {
                    warn!(
                        "Recurring reminder: {} has no next occurrence and becomes dormant",
                        reminder.id
                    );
                }
                self.cancel_reminder(&reminder.id).await?;
                Ok(ScheduleOutcome::Dormant)
            }
        }
    }

    async fn fire_overdue(&self, reminder: &Reminder) -> Result<ScheduleOutcome, SchedulingError> {
        let usecase = FireReminderUseCase {
            reminder_id: reminder.id.clone(),
        };
        match execute(usecase, &self.ctx).await {
            Ok(_) => {
                // A job left over from an earlier scheduling would only be a no-op
                self.cancel_reminder(&reminder.id).await?;
                Ok(ScheduleOutcome::FiredImmediately)
            }
            Err(_) => {
                let now = self.ctx.sys.get_timestamp_millis();
                let retry = ReminderJob::new(reminder.id.clone(), now);
                self.ctx
                    .repos
                    .reminder_jobs
                    .upsert(&retry)
                    .await
                    .map_err(SchedulingError::Storage)?;
                Err(SchedulingError::Firing)
            }
        }
    }

    /// Removes the pending job of the reminder, if any
    pub async fn cancel_reminder(&self, reminder_id: &ID) -> Result<(), SchedulingError> {
        self.ctx
            .repos
            .reminder_jobs
            .delete_by_reminder(reminder_id)
            .await
            .map(|_| ())
            .map_err(SchedulingError::Storage)
    }

    pub async fn reschedule_reminder(
        &self,
        reminder: &Reminder,
    ) -> Result<ScheduleOutcome, SchedulingError> {
        self.cancel_reminder(&reminder.id).await?;
        self.schedule_reminder(reminder).await
    }

    /// Claims the due jobs and fires them. A job whose firing fails is
    /// released so that the next run retries it. Returns the number of jobs
    /// that were claimed.
    pub async fn run_due_jobs(&self) -> usize {
        let config = &self.ctx.config;
        let now = self.ctx.sys.get_timestamp_millis();
        let locked_until = now + config.job_lease_secs * 1000;

        let jobs = match self
            .ctx
            .repos
            .reminder_jobs
            .claim_due(now, locked_until, config.job_batch_size)
            .await
        {
            Ok(jobs) => jobs,
            Err(e) => {
                error!("Unable to claim due reminder jobs. Err: {:?}", e);
                return 0;
            }
        };

        join_all(jobs.iter().map(|job| self.run_job(job))).await;
        jobs.len()
    }

    async fn run_job(&self, job: &ReminderJob) {
        let usecase = FireReminderUseCase {
            reminder_id: job.reminder_id.clone(),
        };
        let jobs = &self.ctx.repos.reminder_jobs;
        match execute(usecase, &self.ctx).await {
            Ok(outcome) => {
                if outcome != FireOutcome::Fired {
                    info!("Job: {} completed without firing: {:?}", job.id, outcome);
                }
                // Completing by job id leaves a job that replaced this one untouched
                if let Err(e) = jobs.complete(&job.id).await {
                    error!("Unable to complete reminder job: {}. Err: {:?}", job.id, e);
                }
            }
            Err(_) => {
                if let Err(e) = jobs.release(&job.id).await {
                    error!("Unable to release reminder job: {}. Err: {:?}", job.id, e);
                }
            }
        }
    }

    /// Brings the job store in line with the stored reminders. Every reminder
    /// that can still fire gets its job (re)installed and overdue one-off
    /// reminders are fired. Meant to run when the process starts.
    pub async fn reconcile(&self) -> Result<ReconcileSummary, SchedulingError> {
        let reminders = self
            .ctx
            .repos
            .reminders
            .find_unsent()
            .await
            .map_err(SchedulingError::Storage)?;

        let mut summary = ReconcileSummary::default();
        for reminder in reminders {
            match self.schedule_reminder(&reminder).await {
                Ok(ScheduleOutcome::Scheduled(_)) => summary.scheduled += 1,
                Ok(ScheduleOutcome::FiredImmediately) => summary.fired += 1,
                Ok(ScheduleOutcome::Dormant) => summary.dormant += 1,
                Err(e) => {
                    error!("Unable to reconcile reminder: {}. Err: {:?}", reminder.id, e);
                    summary.failed += 1;
                }
            }
        }

        info!("Reconciled reminders: {:?}", summary);
        Ok(summary)
    }
}
