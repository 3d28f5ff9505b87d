use crate::{
    error::MediError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use medi_reminder_api_structs::mark_notification_read::*;
use medi_reminder_domain::{Notification, ID};
use medi_reminder_infra::MediContext;

fn handle_error(e: UseCaseErrors) -> MediError {
    match e {
        UseCaseErrors::NotFound(notification_id) => MediError::NotFound(format!(
            "The notification with id: {}, was not found.",
            notification_id
        )),
        UseCaseErrors::StorageError => MediError::InternalError,
    }
}

pub async fn mark_notification_read_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<MediContext>,
) -> Result<HttpResponse, MediError> {
    let user_id = protect_route(&http_req, &ctx)?;

    let usecase = MarkNotificationReadUseCase {
        user_id,
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(handle_error)
}

#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub user_id: ID,
    pub notification_id: ID,
}

#[derive(Debug)]
pub enum UseCaseErrors {
    NotFound(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkNotificationReadUseCase {
    type Response = Notification;

    type Errors = UseCaseErrors;

    async fn execute(&mut self, ctx: &MediContext) -> Result<Self::Response, Self::Errors> {
        ctx.repos
            .notifications
            .mark_read(&self.notification_id, &self.user_id)
            .await
            .map_err(|_| UseCaseErrors::StorageError)?
            .ok_or_else(|| UseCaseErrors::NotFound(self.notification_id.clone()))
    }
}
