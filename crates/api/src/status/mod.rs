use actix_web::{web, HttpResponse};
use medi_reminder_api_structs::get_service_health::*;
use medi_reminder_infra::MediContext;

async fn status(ctx: web::Data<MediContext>) -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Yo! We are up!\r\n".into(),
        server_time: ctx.sys.get_timestamp_millis(),
        timezone: ctx.config.timezone.name().to_string(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/healthcheck", web::get().to(status));
}
