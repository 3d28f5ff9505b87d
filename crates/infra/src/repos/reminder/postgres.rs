use super::IReminderRepo;
use medi_reminder_domain::{RecurrenceRule, RecurrenceType, Reminder, ReminderSchedule, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    user_uid: Uuid,
    medicine_uid: Option<Uuid>,
    medicine_name: String,
    scheduled_at: Option<i64>,
    sent: bool,
    recurrence_type: Option<String>,
    recurrence_time: Option<String>,
    days_of_week: Vec<String>,
    every_x_days: Option<i64>,
    last_run: Option<i64>,
    message: Option<String>,
    created: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        let schedule = match (raw.scheduled_at, raw.recurrence_type) {
            (_, Some(recurrence_type)) => ReminderSchedule::Recurring(RecurrenceRule {
                recurrence_type: recurrence_type.parse::<RecurrenceType>()?,
                time: raw.recurrence_time.unwrap_or_default(),
                days_of_week: raw.days_of_week,
                every_x_days: raw.every_x_days,
            }),
            (Some(scheduled_at), None) => ReminderSchedule::Once { scheduled_at },
            (None, None) => anyhow::bail!(
                "Reminder: {} has neither a scheduled time nor a recurrence",
                raw.reminder_uid
            ),
        };

        Ok(Reminder {
            id: raw.reminder_uid.into(),
            user_id: raw.user_uid.into(),
            medicine_id: raw.medicine_uid.map(ID::from),
            medicine_name: raw.medicine_name,
            schedule,
            message: raw.message,
            sent: raw.sent,
            last_run: raw.last_run,
            created: raw.created,
        })
    }
}

/// Rows that can not be turned into a `Reminder` are logged and skipped
/// so that a single corrupt row does not hide every other reminder.
fn to_domain(rows: Vec<ReminderRaw>) -> Vec<Reminder> {
    rows.into_iter()
        .filter_map(|raw| match Reminder::try_from(raw) {
            Ok(reminder) => Some(reminder),
            Err(e) => {
                error!("Unable to load stored reminder: {:?}", e);
                None
            }
        })
        .collect()
}

struct ScheduleColumns<'a> {
    scheduled_at: Option<i64>,
    recurrence_type: Option<&'static str>,
    recurrence_time: Option<&'a str>,
    days_of_week: &'a [String],
    every_x_days: Option<i64>,
}

fn schedule_columns(reminder: &Reminder) -> ScheduleColumns<'_> {
    match &reminder.schedule {
        ReminderSchedule::Once { scheduled_at } => ScheduleColumns {
            scheduled_at: Some(*scheduled_at),
            recurrence_type: None,
            recurrence_time: None,
            days_of_week: &[],
            every_x_days: None,
        },
        ReminderSchedule::Recurring(rule) => ScheduleColumns {
            scheduled_at: None,
            recurrence_type: Some(rule.recurrence_type.as_str()),
            recurrence_time: Some(&rule.time),
            days_of_week: &rule.days_of_week,
            every_x_days: rule.every_x_days,
        },
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let schedule = schedule_columns(reminder);
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, user_uid, medicine_uid, medicine_name, scheduled_at, sent,
             recurrence_type, recurrence_time, days_of_week, every_x_days, last_run, message, created)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.user_id.inner_ref())
        .bind(reminder.medicine_id.as_ref().map(|id| *id.inner_ref()))
        .bind(&reminder.medicine_name)
        .bind(schedule.scheduled_at)
        .bind(reminder.sent)
        .bind(schedule.recurrence_type)
        .bind(schedule.recurrence_time)
        .bind(schedule.days_of_week)
        .bind(schedule.every_x_days)
        .bind(reminder.last_run)
        .bind(&reminder.message)
        .bind(reminder.created)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let schedule = schedule_columns(reminder);
        sqlx::query(
            r#"
            UPDATE reminders SET
                medicine_uid = $2,
                medicine_name = $3,
                scheduled_at = $4,
                sent = $5,
                recurrence_type = $6,
                recurrence_time = $7,
                days_of_week = $8,
                every_x_days = $9,
                last_run = $10,
                message = $11
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.medicine_id.as_ref().map(|id| *id.inner_ref()))
        .bind(&reminder.medicine_name)
        .bind(schedule.scheduled_at)
        .bind(reminder.sent)
        .bind(schedule.recurrence_type)
        .bind(schedule.recurrence_time)
        .bind(schedule.days_of_week)
        .bind(schedule.every_x_days)
        .bind(reminder.last_run)
        .bind(&reminder.message)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        raw.map(Reminder::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.user_uid = $1
            ORDER BY r.scheduled_at DESC NULLS LAST, r.created DESC
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(to_domain(rows))
    }

    async fn find_unsent(&self) -> anyhow::Result<Vec<Reminder>> {
        let rows: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.sent = false OR r.recurrence_type IS NOT NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(to_domain(rows))
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            DELETE FROM reminders AS r
            WHERE r.reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        raw.map(Reminder::try_from).transpose()
    }

    async fn mark_fired(
        &self,
        reminder_id: &ID,
        fired_at: i64,
    ) -> anyhow::Result<Option<Reminder>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            UPDATE reminders AS r SET
                sent = r.sent OR r.recurrence_type IS NULL,
                last_run = CASE WHEN r.recurrence_type IS NULL THEN r.last_run ELSE $2 END
            WHERE r.reminder_uid = $1 AND (r.recurrence_type IS NOT NULL OR r.sent = false)
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .bind(fired_at)
        .fetch_optional(&self.pool)
        .await?;

        raw.map(Reminder::try_from).transpose()
    }
}
