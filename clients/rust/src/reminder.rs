use crate::{APIResponse, BaseClient};
use masterclass_mailer_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Triggers a reminder sweep, requires the cron secret to be set on the sdk
    pub async fn send_reminders(&self) -> APIResponse<send_reminders::APIResponse> {
        self.base
            .get("api/cron/send-reminders".into(), StatusCode::OK)
            .await
    }
}
