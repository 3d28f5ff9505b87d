use crate::{
    error::MediError,
    scheduler::ReminderScheduler,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use medi_reminder_api_structs::delete_reminder::*;
use medi_reminder_domain::{Reminder, ID};
use medi_reminder_infra::MediContext;
use tracing::error;

fn handle_error(e: UseCaseErrors) -> MediError {
    match e {
        UseCaseErrors::NotFound(reminder_id) => MediError::NotFound(format!(
            "The reminder with id: {}, was not found.",
            reminder_id
        )),
        UseCaseErrors::StorageError => MediError::InternalError,
    }
}

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<MediContext>,
    scheduler: web::Data<ReminderScheduler>,
) -> Result<HttpResponse, MediError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = DeleteReminderUseCase {
        user_id,
        reminder_id: path_params.reminder_id.clone(),
        scheduler: &scheduler,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(handle_error)
}

/// Cancels a `Reminder`: removes the record and its pending job
#[derive(Debug)]
pub struct DeleteReminderUseCase<'a> {
    pub user_id: ID,
    pub reminder_id: ID,
    pub scheduler: &'a ReminderScheduler,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for DeleteReminderUseCase<'a> {
    type Response = Reminder;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MediContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) if reminder.user_id == self.user_id => (),
            Ok(_) => return Err(UseCaseErrors::NotFound(self.reminder_id.clone())),
            Err(_) => return Err(UseCaseErrors::StorageError),
        };

        let reminder = ctx
            .repos
            .reminders
            .delete(&self.reminder_id)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?
            .ok_or_else(|| UseCaseErrors::NotFound(self.reminder_id.clone()))?;

        // A job that survives this fires as a no-op since the reminder is gone
        if let Err(e) = self.scheduler.cancel_reminder(&reminder.id).await {
            error!(
                "Unable to remove the pending job of deleted reminder: {}. Err: {:?}",
                reminder.id, e
            );
        }

        Ok(reminder)
    }
}
