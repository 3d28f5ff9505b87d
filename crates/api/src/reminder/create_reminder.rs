use super::{schedule_stored_reminder, ScheduledReminder};
use crate::{
    error::MediError,
    scheduler::ReminderScheduler,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use medi_reminder_api_structs::create_reminder::*;
use medi_reminder_domain::{InvalidReminderError, Reminder, ReminderScheduleInput, ID};
use medi_reminder_infra::MediContext;

fn handle_error(e: UseCaseErrors) -> MediError {
    match e {
        UseCaseErrors::InvalidReminder(e) => MediError::BadClientData(e.to_string()),
        UseCaseErrors::StorageError => MediError::InternalError,
    }
}

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<MediContext>,
    scheduler: web::Data<ReminderScheduler>,
) -> Result<HttpResponse, MediError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        user_id,
        medicine_id: body.medicine_id,
        medicine_name: body.medicine_name,
        message: body.message,
        schedule: ReminderScheduleInput {
            scheduled_at: body.scheduled_at,
            is_recurring: body.is_recurring.unwrap_or(false),
            recurrence_type: body.recurrence_type,
            days_of_week: body.days_of_week,
            time: body.time,
            every_x_days: body.every_x_days,
        },
        scheduler: &scheduler,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Created().json(APIResponse::new(
                res.reminder,
                res.next_occurrence,
                res.scheduling_warning,
            ))
        })
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct CreateReminderUseCase<'a> {
    pub user_id: ID,
    pub medicine_id: Option<ID>,
    pub medicine_name: String,
    pub message: Option<String>,
    pub schedule: ReminderScheduleInput,
    pub scheduler: &'a ReminderScheduler,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    InvalidReminder(InvalidReminderError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for CreateReminderUseCase<'a> {
    type Response = ScheduledReminder;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MediContext) -> Result<Self::Response, Self::Errors> {
        let reminder = Reminder::new(
            self.user_id.clone(),
            self.medicine_id.take(),
            std::mem::take(&mut self.medicine_name),
            self.message.take(),
            std::mem::take(&mut self.schedule),
            ctx.sys.get_timestamp_millis(),
        )
        .map_err(UseCaseErrors::InvalidReminder)?;

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(schedule_stored_reminder(self.scheduler, reminder, false).await)
    }
}
