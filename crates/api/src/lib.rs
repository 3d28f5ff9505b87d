mod error;
mod job_schedulers;
mod notification;
mod reminder;
mod scheduler;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::start_reminder_job_worker;
use medi_reminder_infra::MediContext;
use std::net::TcpListener;
use tracing::{error, info};
use tracing_actix_web::TracingLogger;

pub use scheduler::{ReconcileSummary, ReminderScheduler, ScheduleOutcome, SchedulingError};
pub use shared::auth::issue_token;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    notification::configure_routes(cfg);
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: MediContext) -> Result<Self, std::io::Error> {
        let scheduler = web::Data::new(ReminderScheduler::new(context.clone()));
        Application::reconcile_reminders(&scheduler).await;

        let (server, port) = Application::configure_server(context, scheduler.clone()).await?;
        Application::start_job_schedulers(scheduler);

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Reminders whose jobs were lost, or that became due while the
    /// process was down, are picked up here
    async fn reconcile_reminders(scheduler: &ReminderScheduler) {
        info!("RECONCILING REMINDERS ...");
        match scheduler.reconcile().await {
            Ok(summary) => info!("RECONCILING REMINDERS ... [done] {:?}", summary),
            Err(e) => error!("Unable to reconcile reminders: {:?}", e),
        }
    }

    fn start_job_schedulers(scheduler: web::Data<ReminderScheduler>) {
        start_reminder_job_worker(scheduler.into_inner());
    }

    async fn configure_server(
        context: MediContext,
        scheduler: web::Data<ReminderScheduler>,
    ) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(scheduler.clone())
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
