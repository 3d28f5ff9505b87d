use crate::dtos::ReminderDTO;
use medi_reminder_domain::{RecurrenceType, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderResponse {
    pub reminder: ReminderDTO,
}

impl ReminderResponse {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
        }
    }
}

/// Returned by the operations that (re)schedule a `Reminder`.
///
/// Failing to schedule does not fail the operation itself, the stored
/// reminder is returned together with a `scheduling_warning` instead.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledReminderResponse {
    pub reminder: ReminderDTO,
    pub next_occurrence: Option<i64>,
    pub scheduling_warning: Option<String>,
}

impl ScheduledReminderResponse {
    pub fn new(
        reminder: Reminder,
        next_occurrence: Option<i64>,
        scheduling_warning: Option<String>,
    ) -> Self {
        Self {
            reminder: ReminderDTO::new(reminder),
            next_occurrence,
            scheduling_warning,
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub medicine_id: Option<ID>,
        pub medicine_name: String,
        pub message: Option<String>,
        pub scheduled_at: Option<i64>,
        pub is_recurring: Option<bool>,
        pub recurrence_type: Option<RecurrenceType>,
        pub days_of_week: Option<Vec<String>>,
        pub time: Option<String>,
        pub every_x_days: Option<i64>,
    }

    pub type APIResponse = ScheduledReminderResponse;
}

pub mod update_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub medicine_id: Option<ID>,
        pub medicine_name: Option<String>,
        pub message: Option<String>,
        pub scheduled_at: Option<i64>,
        pub is_recurring: Option<bool>,
        pub recurrence_type: Option<RecurrenceType>,
        pub days_of_week: Option<Vec<String>>,
        pub time: Option<String>,
        pub every_x_days: Option<i64>,
    }

    pub type APIResponse = ScheduledReminderResponse;
}

pub mod delete_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    pub type APIResponse = ReminderResponse;
}

pub mod get_reminder {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
        pub next_occurrence: Option<i64>,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder, next_occurrence: Option<i64>) -> Self {
            Self {
                reminder: ReminderDTO::new(reminder),
                next_occurrence,
            }
        }
    }
}

pub mod get_my_reminders {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminders: Vec<ReminderDTO>,
    }

    impl APIResponse {
        pub fn new(reminders: Vec<Reminder>) -> Self {
            Self {
                reminders: reminders.into_iter().map(ReminderDTO::new).collect(),
            }
        }
    }
}

pub mod get_next_reminder {
    use super::*;
    use crate::dtos::NextReminderDTO;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub next: Option<NextReminderDTO>,
    }

    impl APIResponse {
        pub fn new(next: Option<(Reminder, i64)>) -> Self {
            Self {
                next: next.map(|(reminder, next_occurrence)| NextReminderDTO {
                    reminder: ReminderDTO::new(reminder),
                    next_occurrence,
                }),
            }
        }
    }
}
