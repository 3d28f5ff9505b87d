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
use medi_reminder_api_structs::update_reminder::*;
use medi_reminder_domain::{InvalidReminderError, ReminderUpdate, ID};
use medi_reminder_infra::MediContext;

fn handle_error(e: UseCaseErrors) -> MediError {
    match e {
        UseCaseErrors::NotFound(reminder_id) => MediError::NotFound(format!(
            "The reminder with id: {}, was not found.",
            reminder_id
        )),
        UseCaseErrors::AlreadySent => MediError::BadClientData("Reminder already sent".into()),
        UseCaseErrors::InvalidReminder(e) => MediError::BadClientData(e.to_string()),
        UseCaseErrors::StorageError => MediError::InternalError,
    }
}

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<MediContext>,
    scheduler: web::Data<ReminderScheduler>,
) -> Result<HttpResponse, MediError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        user_id,
        reminder_id: path_params.reminder_id.clone(),
        update: ReminderUpdate {
            medicine_id: body.medicine_id,
            medicine_name: body.medicine_name,
            message: body.message,
            scheduled_at: body.scheduled_at,
            is_recurring: body.is_recurring,
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
            HttpResponse::Ok().json(APIResponse::new(
                res.reminder,
                res.next_occurrence,
                res.scheduling_warning,
            ))
        })
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct UpdateReminderUseCase<'a> {
    pub user_id: ID,
    pub reminder_id: ID,
    pub update: ReminderUpdate,
    pub scheduler: &'a ReminderScheduler,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    AlreadySent,
    InvalidReminder(InvalidReminderError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for UpdateReminderUseCase<'a> {
    type Response = ScheduledReminder;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MediContext) -> Result<Self::Response, Self::Errors> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) if reminder.user_id == self.user_id => reminder,
            Ok(_) => return Err(UseCaseErrors::NotFound(self.reminder_id.clone())),
            Err(_) => return Err(UseCaseErrors::StorageError),
        };
        if reminder.is_spent() {
            return Err(UseCaseErrors::AlreadySent);
        }

        reminder
            .apply_update(std::mem::take(&mut self.update))
            .map_err(UseCaseErrors::InvalidReminder)?;
        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?;

        Ok(schedule_stored_reminder(self.scheduler, reminder, true).await)
    }
}
