use super::required_field;
use crate::{
    error::MailerError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use masterclass_mailer_api_structs::send_registration_email::{APIResponse, RequestBody};
use masterclass_mailer_domain::{parse_timestamp, Registration};
use masterclass_mailer_infra::MailerContext;
use tracing::warn;

pub async fn send_registration_email_controller(
    ctx: web::Data<MailerContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, MailerError> {
    let body = body.0;
    let usecase = SendRegistrationEmailUseCase {
        email: body.email,
        masterclass_title: body.masterclass_title,
        speaker_name: body.speaker_name,
        scheduled_date: body.scheduled_date,
        masterclass_id: body.masterclass_id,
        user_name: body.user_name,
    };

    execute(usecase, &ctx)
        .await
        .map(|immediate_reminder_sent| {
            HttpResponse::Ok().json(APIResponse {
                success: true,
                immediate_reminder_sent,
            })
        })
        .map_err(MailerError::from)
}

/// Confirms a registration and, when the masterclass is about to start,
/// follows up with a "starting now" reminder in the same request
#[derive(Debug)]
pub struct SendRegistrationEmailUseCase {
    pub email: Option<String>,
    pub masterclass_title: Option<String>,
    pub speaker_name: Option<String>,
    pub scheduled_date: Option<String>,
    pub masterclass_id: Option<String>,
    pub user_name: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MissingRequiredFields,
    InvalidScheduledDate(String),
    InvalidTemplate(String),
    SendFailed,
}

impl From<UseCaseError> for MailerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MissingRequiredFields => {
                Self::BadClientData("Missing required fields".into())
            }
            UseCaseError::InvalidScheduledDate(date) => {
                Self::BadClientData(format!("Invalid scheduledDate: {}", date))
            }
            UseCaseError::InvalidTemplate(msg) => Self::InternalError(msg),
            UseCaseError::SendFailed => Self::InternalError("Failed to send email".into()),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRegistrationEmailUseCase {
    /// Whether the immediate reminder was delivered
    type Response = bool;

    type Error = UseCaseError;

    const NAME: &'static str = "SendRegistrationEmail";

    async fn execute(&mut self, ctx: &MailerContext) -> Result<Self::Response, Self::Error> {
        let (email, masterclass_title) = match (
            required_field(&self.email),
            required_field(&self.masterclass_title),
        ) {
            (Some(email), Some(title)) => (email, title),
            _ => return Err(UseCaseError::MissingRequiredFields),
        };
        let scheduled_date = match required_field(&self.scheduled_date) {
            Some(date) => Some(
                parse_timestamp(&date).ok_or(UseCaseError::InvalidScheduledDate(date))?,
            ),
            None => None,
        };

        let registration = Registration {
            user_name: self.user_name.clone().unwrap_or_default(),
            masterclass_title,
            speaker_name: self.speaker_name.clone(),
            scheduled_date,
            masterclass_id: self.masterclass_id.clone(),
        };
        let now = ctx.sys.now();

        let confirmation = ctx
            .templates
            .registration_confirmation(&email, &registration, now)
            .map_err(|e| UseCaseError::InvalidTemplate(e.to_string()))?;
        if !ctx.mailer.send(&confirmation).await {
            return Err(UseCaseError::SendFailed);
        }

        if !registration.needs_immediate_reminder(now) {
            return Ok(false);
        }

        let reminder = ctx
            .templates
            .immediate_reminder(&email, &registration, now)
            .map_err(|e| UseCaseError::InvalidTemplate(e.to_string()))?;
        let delivered = ctx.mailer.send(&reminder).await;
        if !delivered {
            warn!(
                "Registration confirmed but the immediate reminder could not be delivered to {}",
                email
            );
        }

        Ok(delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use masterclass_mailer_infra::{InMemoryMailer, StaticTimeSys};
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn setup() -> (MailerContext, Arc<InMemoryMailer>) {
        let mut ctx = MailerContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys::at(now()));
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.mailer = mailer.clone();
        (ctx, mailer)
    }

    fn registration_usecase(scheduled_date: Option<String>) -> SendRegistrationEmailUseCase {
        SendRegistrationEmailUseCase {
            email: Some("ada@example.com".into()),
            masterclass_title: Some("Intro to Kafka".into()),
            speaker_name: Some("Grace".into()),
            scheduled_date,
            masterclass_id: Some("mc-1".into()),
            user_name: Some("Ada".into()),
        }
    }

    #[actix_web::test]
    async fn soon_starting_registration_sends_two_emails() {
        let (ctx, mailer) = setup();
        let starts_at = (now() + Duration::minutes(90)).to_rfc3339();

        let mut usecase = registration_usecase(Some(starts_at));
        assert_eq!(usecase.execute(&ctx).await, Ok(true));

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].subject, "✅ Registration Confirmed: Intro to Kafka");
        assert!(sent[0].html_body.contains("Starting Soon!"));
        assert_eq!(sent[1].subject, "🚨 STARTING NOW: Intro to Kafka");
        assert!(sent[1].html_body.contains("90 minutes"));
    }

    #[actix_web::test]
    async fn later_registration_sends_only_the_confirmation() {
        let (ctx, mailer) = setup();
        let starts_at = (now() + Duration::days(3)).to_rfc3339();

        let mut usecase = registration_usecase(Some(starts_at));
        assert_eq!(usecase.execute(&ctx).await, Ok(false));
        assert_eq!(mailer.sent().len(), 1);
        assert!(mailer.sent()[0].html_body.contains("What happens next"));
    }

    #[actix_web::test]
    async fn unscheduled_registration_sends_only_the_confirmation() {
        let (ctx, mailer) = setup();

        let mut usecase = registration_usecase(None);
        assert_eq!(usecase.execute(&ctx).await, Ok(false));
        assert_eq!(mailer.sent().len(), 1);
        assert!(mailer.sent()[0].html_body.contains("TBA"));
    }

    #[actix_web::test]
    async fn undelivered_immediate_reminder_is_reported() {
        let (ctx, mailer) = setup();
        mailer.fail_for_subject("STARTING NOW");
        let starts_at = (now() + Duration::minutes(30)).to_rfc3339();

        let mut usecase = registration_usecase(Some(starts_at));
        assert_eq!(usecase.execute(&ctx).await, Ok(false));
        assert_eq!(mailer.sent().len(), 1);
    }

    #[actix_web::test]
    async fn undelivered_confirmation_fails() {
        let (ctx, mailer) = setup();
        mailer.fail_for("ada@example.com");
        let starts_at = (now() + Duration::minutes(30)).to_rfc3339();

        let mut usecase = registration_usecase(Some(starts_at));
        assert_eq!(usecase.execute(&ctx).await, Err(UseCaseError::SendFailed));
        assert!(mailer.sent().is_empty());
    }

    #[actix_web::test]
    async fn it_validates_the_request() {
        let (ctx, mailer) = setup();

        let mut usecase = registration_usecase(None);
        usecase.masterclass_title = None;
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::MissingRequiredFields)
        );

        let mut usecase = registration_usecase(Some("next tuesday".into()));
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidScheduledDate("next tuesday".into()))
        );

        assert!(mailer.sent().is_empty());
    }
}
