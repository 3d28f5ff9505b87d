mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{DeleteResult, IReminderRepo, Repos};
use std::sync::Arc;
pub use system::{ISys, RealSys};
use tracing::warn;

#[derive(Clone)]
pub struct MediContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl MediContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(&params.postgres_connection_string).await?;
        Ok(Self {
            repos,
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        })
    }

    /// A context where nothing outlives the process. Used by tests and
    /// when no database has been configured.
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<MediContext> {
    match get_psql_connection_string() {
        Some(postgres_connection_string) => {
            MediContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        None => {
            warn!("DATABASE_URL env var is not set. Reminders and pending jobs will only be kept in memory and are lost on restart.");
            Ok(MediContext::create_inmemory())
        }
    }
}

fn get_psql_connection_string() -> Option<String> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING).ok()
}
