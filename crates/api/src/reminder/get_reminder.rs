use crate::{
    error::MediError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use medi_reminder_api_structs::get_reminder::*;
use medi_reminder_domain::{next_occurrence, Reminder, ID};
use medi_reminder_infra::MediContext;

fn handle_error(e: UseCaseErrors) -> MediError {
    match e {
        UseCaseErrors::NotFound(reminder_id) => MediError::NotFound(format!(
            "The reminder with id: {}, was not found.",
            reminder_id
        )),
        UseCaseErrors::StorageError => MediError::InternalError,
    }
}

pub async fn get_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<MediContext>,
) -> Result<HttpResponse, MediError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = GetReminderUseCase {
        user_id,
        reminder_id: path_params.reminder_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|(reminder, next)| HttpResponse::Ok().json(APIResponse::new(reminder, next)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct GetReminderUseCase {
    pub user_id: ID,
    pub reminder_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetReminderUseCase {
    /// The reminder and its next occurrence
    type Response = (Reminder, Option<i64>);

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MediContext) -> Result<Self::Response, Self::Errors> {
        match ctx.repos.reminders.find(&self.reminder_id).await {
            Ok(Some(reminder)) if reminder.user_id == self.user_id => {
                let now = ctx.sys.get_timestamp_millis();
                let next = next_occurrence(&reminder, now, &ctx.config.timezone);
                Ok((reminder, next))
            }
            Ok(_) => Err(UseCaseErrors::NotFound(self.reminder_id.clone())),
            Err(_) => Err(UseCaseErrors::StorageError),
        }
    }
}
