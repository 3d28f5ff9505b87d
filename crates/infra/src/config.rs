use medi_reminder_domain::Tz;
use medi_reminder_utils::create_random_secret;
use std::fmt::Display;
use std::str::FromStr;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign and verify the bearer tokens of `User`s
    pub jwt_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// The timezone in which recurring reminder times like "08:00" are
    /// interpreted, i.e. the server local time.
    pub timezone: Tz,
    /// How often the job worker looks for due reminders
    pub job_poll_interval_secs: u64,
    /// For how long a claimed job is hidden from other workers. If the
    /// firing neither completes nor fails within this time, the job is
    /// delivered again.
    pub job_lease_secs: i64,
    /// Maximum number of jobs fired per worker tick
    pub job_batch_size: usize,
}

/// Reads and parses the env var, falling back to the default when it is
/// missing or invalid
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default value: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find JWT_SECRET environment variable. Going to create one.");
                info!("Tokens issued before a restart will not be accepted after it.");
                create_random_secret(32)
            }
        };
        let port = parse_env("PORT", 5000);
        let timezone = parse_env("REMINDER_TIMEZONE", Tz::UTC);
        info!("Reminder times are interpreted in timezone: {}", timezone);

        let job_poll_interval_secs = match parse_env("JOB_POLL_INTERVAL_SECS", 5) {
            0 => 1,
            secs => secs,
        };
        let job_lease_secs = match parse_env("JOB_LEASE_SECS", 60) {
            secs if secs < 1 => 1,
            secs => secs,
        };
        let job_batch_size = match parse_env("JOB_BATCH_SIZE", 20) {
            0 => 1,
            size => size,
        };

        Self {
            jwt_secret,
            port,
            timezone,
            job_poll_interval_secs,
            job_lease_secs,
            job_batch_size,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
