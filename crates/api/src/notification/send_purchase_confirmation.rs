use super::required_field;
use crate::{
    error::MailerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use masterclass_mailer_api_structs::send_purchase_confirmation::{APIResponse, RequestBody};
use masterclass_mailer_domain::{Purchase, PurchaseType};
use masterclass_mailer_infra::MailerContext;

pub async fn send_purchase_confirmation_controller(
    ctx: web::Data<MailerContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MailerError> {
    let usecase = SendPurchaseConfirmationUseCase::from(body.0);

    execute(usecase, &ctx)
        .await
        .map(|_| HttpResponse::Ok().json(APIResponse { success: true }))
        .map_err(MailerError::from)
}

#[derive(Debug)]
pub struct SendPurchaseConfirmationUseCase {
    pub email: Option<String>,
    pub user_name: Option<String>,
    pub masterclass_title: Option<String>,
    pub video_title: Option<String>,
    pub amount: Option<f64>,
    pub order_id: Option<String>,
    pub payment_id: Option<String>,
    pub masterclass_id: Option<String>,
    pub purchase_type: Option<String>,
}

impl From<RequestBody> for SendPurchaseConfirmationUseCase {
    fn from(body: RequestBody) -> Self {
        Self {
            email: body.email,
            user_name: body.user_name,
            masterclass_title: body.masterclass_title,
            video_title: body.video_title,
            amount: body.amount,
            order_id: body.order_id,
            payment_id: body.payment_id,
            masterclass_id: body.masterclass_id,
            purchase_type: body.purchase_type,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingRequiredFields,
    InvalidTemplate(String),
    SendFailed,
}

impl From<UseCaseError> for MailerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingRequiredFields => {
                Self::BadClientData("Missing required fields".into())
            }
            UseCaseError::InvalidTemplate(msg) => Self::InternalError(msg),
            UseCaseError::SendFailed => Self::InternalError("Failed to send email".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendPurchaseConfirmationUseCase {
    type Response = ();

    type Error = UseCaseError;

    const NAME: &'static str = "SendPurchaseConfirmation";

    async fn execute(&mut self, ctx: &MailerContext) -> Result<Self::Response, Self::Error> {
        let (email, masterclass_title) = match (
            required_field(&self.email),
            required_field(&self.masterclass_title),
        ) {
            (Some(email), Some(title)) => (email, title),
            _ => return Err(UseCaseError::MissingRequiredFields),
        };

        let purchase = Purchase {
            user_name: self.user_name.clone().unwrap_or_default(),
            masterclass_title,
            video_title: required_field(&self.video_title),
            amount: self.amount.unwrap_or(0.0),
            order_id: self.order_id.clone(),
            payment_id: self.payment_id.clone(),
            masterclass_id: self.masterclass_id.clone(),
            purchase_type: PurchaseType::parse(self.purchase_type.as_deref()),
        };

        let message = ctx
            .templates
            .purchase_confirmation(&email, &purchase, ctx.sys.now())
            .map_err(|e| UseCaseError::InvalidTemplate(e.to_string()))?;

        if ctx.mailer.send(&message).await {
            Ok(())
        } else {
            Err(UseCaseError::SendFailed)
        }
    }
}
