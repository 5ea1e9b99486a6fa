use crate::{APIResponse, BaseClient};
use masterclass_mailer_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

#[derive(Debug, Clone, Default)]
pub struct SendPurchaseConfirmationInput {
    pub email: String,
    pub user_name: Option<String>,
    pub masterclass_title: String,
    pub video_title: Option<String>,
    pub amount: Option<f64>,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub masterclass_id: Option<String>,
    pub purchase_type: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SendRegistrationEmailInput {
    pub email: String,
    pub masterclass_title: String,
    pub speaker_name: Option<String>,
    /// RFC 3339 timestamp of the start of the masterclass
    pub scheduled_date: Option<String>,
    pub masterclass_id: Option<String>,
    pub user_name: Option<String>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn send_purchase_confirmation(
        &self,
        input: SendPurchaseConfirmationInput,
    ) -> APIResponse<send_purchase_confirmation::APIResponse> {
        let body = send_purchase_confirmation::RequestBody {
            email: Some(input.email),
            user_name: input.user_name,
            masterclass_title: Some(input.masterclass_title),
            video_title: input.video_title,
            amount: input.amount,
            order_id: input.order_id,
            payment_id: input.payment_id,
            masterclass_id: input.masterclass_id,
            purchase_type: input.purchase_type,
        };
        self.base
            .post(
                body,
                "api/send-purchase-confirmation".into(),
                StatusCode::OK,
            )
            .await
    }

    pub async fn send_registration_email(
        &self,
        input: SendRegistrationEmailInput,
    ) -> APIResponse<send_registration_email::APIResponse> {
        let body = send_registration_email::RequestBody {
            email: Some(input.email),
            masterclass_title: Some(input.masterclass_title),
            speaker_name: input.speaker_name,
            scheduled_date: input.scheduled_date,
            masterclass_id: input.masterclass_id,
            user_name: input.user_name,
        };
        self.base
            .post(body, "api/send-registration-email".into(), StatusCode::OK)
            .await
    }
}
