mod message;
mod notification;
mod reminder;
mod reminder_job;
mod shared;

use message::{IMessageRepo, InMemoryMessageRepo, PostgresMessageRepo};
use notification::{INotificationRepo, InMemoryNotificationRepo, PostgresNotificationRepo};
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use reminder_job::{IReminderJobRepo, InMemoryReminderJobRepo, PostgresReminderJobRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use reminder::IReminderRepo;
pub use shared::repo::DeleteResult;

#[derive(Clone)]
pub struct Repos {
    pub reminders: Arc<dyn IReminderRepo>,
    pub reminder_jobs: Arc<dyn IReminderJobRepo>,
    pub messages: Arc<dyn IMessageRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB EXECUTING MIGRATION ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB EXECUTING MIGRATION ... [done]");

        Ok(Self {
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            reminder_jobs: Arc::new(PostgresReminderJobRepo::new(pool.clone())),
            messages: Arc::new(PostgresMessageRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            reminders: Arc::new(InMemoryReminderRepo::new()),
            reminder_jobs: Arc::new(InMemoryReminderJobRepo::new()),
            messages: Arc::new(InMemoryMessageRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
        }
    }
}
