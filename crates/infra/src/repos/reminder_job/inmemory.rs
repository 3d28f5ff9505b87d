use super::IReminderJobRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use medi_reminder_domain::{ReminderJob, ID};

pub struct InMemoryReminderJobRepo {
    jobs: std::sync::Mutex<Vec<ReminderJob>>,
}

impl InMemoryReminderJobRepo {
    pub fn new() -> Self {
        Self {
            jobs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderJobRepo for InMemoryReminderJobRepo {
    async fn upsert(&self, job: &ReminderJob) -> anyhow::Result<()> {
        let mut jobs = lock(&self.jobs);
        jobs.retain(|j| j.reminder_id != job.reminder_id);
        let mut job = job.clone();
        job.locked_until = None;
        jobs.push(job);
        Ok(())
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Option<ReminderJob>> {
        Ok(find_by(&self.jobs, |j| j.reminder_id == *reminder_id)
            .into_iter()
            .next())
    }

    async fn delete_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<DeleteResult> {
        Ok(delete_by(&self.jobs, |j| j.reminder_id == *reminder_id))
    }

    async fn claim_due(
        &self,
        now: i64,
        locked_until: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ReminderJob>> {
        let mut jobs = lock(&self.jobs);
        let mut due = jobs
            .iter_mut()
            .filter(|j| j.is_claimable(now))
            .collect::<Vec<_>>();
        due.sort_by_key(|j| j.run_at);

        Ok(due
            .into_iter()
            .take(limit)
            .map(|job| {
                job.locked_until = Some(locked_until);
                job.clone()
            })
            .collect())
    }

    async fn complete(&self, job_id: &ID) -> anyhow::Result<()> {
        delete(job_id, &self.jobs);
        Ok(())
    }

    async fn release(&self, job_id: &ID) -> anyhow::Result<()> {
        update_many(&self.jobs, |j| j.id == *job_id, |j| j.locked_until = None);
        Ok(())
    }
}
