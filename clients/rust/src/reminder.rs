use crate::{APIResponse, BaseClient, RecurrenceType, ID};
use medi_reminder_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

/// A one-off reminder sets `scheduled_at`, a recurring one sets
/// `is_recurring` together with the recurrence fields
#[derive(Debug, Clone, Default)]
pub struct CreateReminderInput {
    pub medicine_id: Option<ID>,
    pub medicine_name: String,
    pub message: Option<String>,
    pub scheduled_at: Option<i64>,
    pub is_recurring: bool,
    pub recurrence_type: Option<RecurrenceType>,
    pub days_of_week: Option<Vec<String>>,
    pub time: Option<String>,
    pub every_x_days: Option<i64>,
}

/// Fields that are `None` keep their current value
#[derive(Debug, Clone, Default)]
pub struct UpdateReminderInput {
    pub reminder_id: ID,
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

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            medicine_id: input.medicine_id,
            medicine_name: input.medicine_name,
            message: input.message,
            scheduled_at: input.scheduled_at,
            is_recurring: Some(input.is_recurring),
            recurrence_type: input.recurrence_type,
            days_of_week: input.days_of_week,
            time: input.time,
            every_x_days: input.every_x_days,
        };
        self.base
            .post(body, "reminders".into(), StatusCode::CREATED)
            .await
    }

    pub async fn update(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_reminder::APIResponse> {
        let body = update_reminder::RequestBody {
            medicine_id: input.medicine_id,
            medicine_name: input.medicine_name,
            message: input.message,
            scheduled_at: input.scheduled_at,
            is_recurring: input.is_recurring,
            recurrence_type: input.recurrence_type,
            days_of_week: input.days_of_week,
            time: input.time,
            every_x_days: input.every_x_days,
        };
        self.base
            .put(
                body,
                format!("reminders/{}", input.reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn get(&self, reminder_id: ID) -> APIResponse<get_reminder::APIResponse> {
        self.base
            .get(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }

    pub async fn get_mine(&self) -> APIResponse<get_my_reminders::APIResponse> {
        self.base.get("reminders/my".into(), StatusCode::OK).await
    }

    pub async fn get_next(&self) -> APIResponse<get_next_reminder::APIResponse> {
        self.base.get("reminders/next".into(), StatusCode::OK).await
    }

    pub async fn delete(&self, reminder_id: ID) -> APIResponse<delete_reminder::APIResponse> {
        self.base
            .delete(format!("reminders/{}", reminder_id), StatusCode::OK)
            .await
    }
}
