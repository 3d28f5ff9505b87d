use medi_reminder_domain::{RecurrenceType, Reminder, ReminderSchedule, ID};
use serde::{Deserialize, Serialize};

/// The flat wire representation of a `Reminder`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub medicine_id: Option<ID>,
    pub medicine_name: String,
    pub scheduled_at: Option<i64>,
    pub is_recurring: bool,
    pub recurrence_type: Option<RecurrenceType>,
    pub days_of_week: Vec<String>,
    pub time: Option<String>,
    pub every_x_days: Option<i64>,
    pub message: Option<String>,
    pub sent: bool,
    pub last_run: Option<i64>,
    pub created: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        let is_recurring = reminder.is_recurring();
        let (scheduled_at, recurrence_type, days_of_week, time, every_x_days) =
            match reminder.schedule {
                ReminderSchedule::Once { scheduled_at } => {
                    (Some(scheduled_at), None, Vec::new(), None, None)
                }
                ReminderSchedule::Recurring(rule) => (
                    None,
                    Some(rule.recurrence_type),
                    rule.days_of_week,
                    Some(rule.time),
                    rule.every_x_days,
                ),
            };

        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            medicine_id: reminder.medicine_id,
            medicine_name: reminder.medicine_name,
            scheduled_at,
            is_recurring,
            recurrence_type,
            days_of_week,
            time,
            every_x_days,
            message: reminder.message,
            sent: reminder.sent,
            last_run: reminder.last_run,
            created: reminder.created,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NextReminderDTO {
    pub reminder: ReminderDTO,
    pub next_occurrence: i64,
}
