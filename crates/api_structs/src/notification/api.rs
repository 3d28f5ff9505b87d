use crate::dtos::NotificationDTO;
use medi_reminder_domain::{Notification, ID};
use serde::{Deserialize, Serialize};

pub mod get_notifications {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>) -> Self {
            Self {
                notifications: notifications.into_iter().map(NotificationDTO::new).collect(),
            }
        }
    }
}

pub mod mark_notification_read {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notification: NotificationDTO,
    }

    impl APIResponse {
        pub fn new(notification: Notification) -> Self {
            Self {
                notification: NotificationDTO::new(notification),
            }
        }
    }
}
