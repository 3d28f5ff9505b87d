mod base;
mod notification;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse};
use notification::NotificationClient;
use reminder::ReminderClient;
pub use reminder::{CreateReminderInput, UpdateReminderInput};
use status::StatusClient;
use std::sync::Arc;

pub use medi_reminder_api_structs::dtos::*;
pub use medi_reminder_domain::{RecurrenceType, ID};

// Domain
pub use medi_reminder_api_structs::dtos::NextReminderDTO as NextReminder;
pub use medi_reminder_api_structs::dtos::NotificationDTO as Notification;
pub use medi_reminder_api_structs::dtos::ReminderDTO as Reminder;

/// MediReminder Server SDK
///
/// The SDK contains methods for interacting with the MediReminder server
/// API on behalf of the `User` identified by the bearer token.
#[derive(Clone)]
pub struct MediReminderSDK {
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl MediReminderSDK {
    pub fn new<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_token(token.into());
        let base = Arc::new(base);

        Self {
            notification: NotificationClient::new(base.clone()),
            reminder: ReminderClient::new(base.clone()),
            status: StatusClient::new(base),
        }
    }
}
