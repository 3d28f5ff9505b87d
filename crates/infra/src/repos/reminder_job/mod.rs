mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderJobRepo;
pub use postgres::PostgresReminderJobRepo;

use crate::repos::shared::repo::DeleteResult;
use medi_reminder_domain::{ReminderJob, ID};

/// Durable storage of pending `ReminderJob`s.
///
/// Delivery is at least once: a claimed job is leased to the claimer and is
/// handed out again when the lease runs out without the job being completed.
#[async_trait::async_trait]
pub trait IReminderJobRepo: Send + Sync {
    /// Stores the job, replacing any pending job of the same reminder
    async fn upsert(&self, job: &ReminderJob) -> anyhow::Result<()>;
    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Option<ReminderJob>>;
    async fn delete_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<DeleteResult>;
    /// Leases up to `limit` due jobs until `locked_until`, earliest first
    async fn claim_due(
        &self,
        now: i64,
        locked_until: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ReminderJob>>;
    /// Removes the claimed job. A job that has since been replaced is left alone.
    async fn complete(&self, job_id: &ID) -> anyhow::Result<()>;
    /// Gives up the lease so the job can be claimed again right away
    async fn release(&self, job_id: &ID) -> anyhow::Result<()>;
}
