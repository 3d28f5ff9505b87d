use crate::{
    error::MediError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use medi_reminder_api_structs::get_my_reminders::*;
use medi_reminder_domain::{Reminder, ID};
use medi_reminder_infra::MediContext;

pub async fn get_my_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<MediContext>,
) -> Result<HttpResponse, MediError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = GetMyRemindersUseCase { user_id };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(|_| MediError::InternalError)
}

#[derive(Debug)]
pub struct GetMyRemindersUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMyRemindersUseCase {
    type Response = Vec<Reminder>;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MediContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .reminders
            .find_by_user(&self.user_id)
            .await
            .map_err(|_| UseCaseErrors::StorageError)
    }
}
