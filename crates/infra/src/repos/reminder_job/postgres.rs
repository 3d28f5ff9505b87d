use super::IReminderJobRepo;
use crate::repos::shared::repo::DeleteResult;
use medi_reminder_domain::{ReminderJob, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderJobRepo {
    pool: PgPool,
}

impl PostgresReminderJobRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderJobRaw {
    job_uid: Uuid,
    reminder_uid: Uuid,
    run_at: i64,
    locked_until: Option<i64>,
}

impl From<ReminderJobRaw> for ReminderJob {
    fn from(raw: ReminderJobRaw) -> Self {
        Self {
            id: raw.job_uid.into(),
            reminder_id: raw.reminder_uid.into(),
            run_at: raw.run_at,
            locked_until: raw.locked_until,
        }
    }
}

#[async_trait::async_trait]
impl IReminderJobRepo for PostgresReminderJobRepo {
    async fn upsert(&self, job: &ReminderJob) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminder_jobs
            (job_uid, reminder_uid, run_at, locked_until)
            VALUES($1, $2, $3, NULL)
            ON CONFLICT (reminder_uid) DO UPDATE SET
                job_uid = EXCLUDED.job_uid,
                run_at = EXCLUDED.run_at,
                locked_until = NULL
            "#,
        )
        .bind(job.id.inner_ref())
        .bind(job.reminder_id.inner_ref())
        .bind(job.run_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<Option<ReminderJob>> {
        let raw: Option<ReminderJobRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminder_jobs AS j
            WHERE j.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw.map(|job| job.into()))
    }

    async fn delete_by_reminder(&self, reminder_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM reminder_jobs AS j
            WHERE j.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn claim_due(
        &self,
        now: i64,
        locked_until: i64,
        limit: usize,
    ) -> anyhow::Result<Vec<ReminderJob>> {
        // SKIP LOCKED lets several server instances claim concurrently
        // without ever handing out the same job twice within a lease.
        let mut jobs: Vec<ReminderJobRaw> = sqlx::query_as(
            r#"
            UPDATE reminder_jobs SET locked_until = $2
            WHERE job_uid IN (
                SELECT job_uid FROM reminder_jobs
                WHERE run_at <= $1 AND (locked_until IS NULL OR locked_until < $1)
                ORDER BY run_at
                LIMIT $3
                FOR UPDATE SKIP LOCKED
            )
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(locked_until)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;
        jobs.sort_by_key(|j| j.run_at);

        Ok(jobs.into_iter().map(|job| job.into()).collect())
    }

    async fn complete(&self, job_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM reminder_jobs AS j
            WHERE j.job_uid = $1
            "#,
        )
        .bind(job_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn release(&self, job_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminder_jobs SET locked_until = NULL
            WHERE job_uid = $1
            "#,
        )
        .bind(job_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
