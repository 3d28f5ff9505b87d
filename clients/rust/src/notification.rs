use crate::{APIResponse, BaseClient, ID};
use medi_reminder_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get_mine(&self) -> APIResponse<get_notifications::APIResponse> {
        self.base.get("notifications".into(), StatusCode::OK).await
    }

    pub async fn mark_read(
        &self,
        notification_id: ID,
    ) -> APIResponse<mark_notification_read::APIResponse> {
        self.base
            .put(
                (),
                format!("notifications/{}/read", notification_id),
                StatusCode::OK,
            )
            .await
    }
}
