use chrono::Utc;
use medi_reminder_api::{issue_token, Application};
use medi_reminder_infra::{setup_context, Config};
use medi_reminder_sdk::{MediReminderSDK, ID};

pub struct TestApp {
    pub config: Config,
    pub address: String,
}

impl TestApp {
    /// A client acting on behalf of a new `User`
    pub fn user_client(&self) -> (ID, MediReminderSDK) {
        let user_id = ID::default();
        let expires_at = Utc::now().timestamp_millis() + 1000 * 60 * 60;
        let token = issue_token(&user_id, &self.config.jwt_secret, expires_at)
            .expect("Expected to issue token");
        (user_id, MediReminderSDK::new(self.address.clone(), token))
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, MediReminderSDK, String) {
    let mut ctx = setup_context().await.expect("Failed to setup context.");
    ctx.config.port = 0; // Random port

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        address: address.clone(),
    };
    let sdk = MediReminderSDK::new(address.clone(), "");
    (app, sdk, address)
}
