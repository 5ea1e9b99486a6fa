use crate::{
    error::MailerError,
    shared::{
        auth::protect_cron_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use masterclass_mailer_api_structs::send_reminders::APIResponse;
use masterclass_mailer_domain::{Masterclass, ReminderKind, SweepReport};
use masterclass_mailer_infra::MailerContext;
use tracing::{error, info, warn};

pub async fn send_reminders_controller(
    http_req: HttpRequest,
    ctx: web::Data<MailerContext>,
) -> Result<HttpResponse, MailerError> {
    protect_cron_route(&http_req, &ctx)?;

    execute(SendRemindersUseCase {}, &ctx)
        .await
        .map(|report| HttpResponse::Ok().json(APIResponse::new(report, ctx.sys.now())))
        .map_err(MailerError::from)
}

/// Sends the reminders that are due for every upcoming masterclass and
/// flags them as sent
#[derive(Debug)]
pub struct SendRemindersUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError(String),
}

impl From<UseCaseError> for MailerError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError(msg) => Self::InternalError(msg),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRemindersUseCase {
    type Response = SweepReport;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminders";

    async fn execute(&mut self, ctx: &MailerContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.now();
        let masterclasses = ctx
            .repos
            .masterclasses
            .find_all()
            .await
            .map_err(|e| UseCaseError::StorageError(e.to_string()))?;

        let mut report = SweepReport::default();
        let mut pacer = SendPacer::new(ctx);

        for masterclass in masterclasses {
            let due = masterclass.due_reminders(now);
            let kind = match due.primary() {
                Some(kind) => kind,
                None => continue,
            };
            if masterclass.joined_users.is_empty() {
                continue;
            }
            report.processed_titles.push(masterclass.title.clone());
            info!(
                masterclass_id = %masterclass.id,
                reminder = kind.flag_key(),
                participants = masterclass.joined_users.len(),
                "Processing masterclass: {}",
                masterclass.title
            );

            let delivered =
                send_to_participants(&masterclass, kind, ctx, &mut pacer, &mut report).await;

            if delivered > 0 {
                ctx.repos
                    .masterclasses
                    .mark_reminders_sent(&masterclass.id, &due.to_update(now))
                    .await
                    .map_err(|e| {
                        error!(
                            masterclass_id = %masterclass.id,
                            "Unable to flag reminders as sent: {:?}",
                            e
                        );
                        UseCaseError::StorageError(e.to_string())
                    })?;
                info!(
                    masterclass_id = %masterclass.id,
                    reminder = kind.flag_key(),
                    delivered,
                    "Flagged reminders as sent"
                );
            }
        }

        Ok(report)
    }
}

/// Sends the reminder of the given kind to every participant with an email address.
/// Returns how many of them it was delivered to.
async fn send_to_participants(
    masterclass: &Masterclass,
    kind: ReminderKind,
    ctx: &MailerContext,
    pacer: &mut SendPacer<'_>,
    report: &mut SweepReport,
) -> usize {
    let now = ctx.sys.now();
    let mut delivered = 0;

    for user_id in &masterclass.joined_users {
        let profile = match ctx.repos.user_profiles.find(user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                warn!(masterclass_id = %masterclass.id, user_id = %user_id, "User profile not found");
                report.skipped += 1;
                continue;
            }
            Err(e) => {
                error!(
                    masterclass_id = %masterclass.id,
                    user_id = %user_id,
                    "Unable to resolve user profile: {:?}",
                    e
                );
                report.errors += 1;
                continue;
            }
        };
        let to = match profile.contact_email() {
            Some(to) => to,
            None => {
                warn!(masterclass_id = %masterclass.id, user_id = %user_id, "No email found for user");
                report.skipped += 1;
                continue;
            }
        };

        let email =
            match ctx
                .templates
                .reminder(kind, masterclass, to, profile.display_name(), now)
            {
                Ok(email) => email,
                Err(e) => {
                    error!(
                        masterclass_id = %masterclass.id,
                        user_id = %user_id,
                        "Unable to render reminder: {:?}",
                        e
                    );
                    report.errors += 1;
                    continue;
                }
            };

        pacer.wait().await;
        if ctx.mailer.send(&email).await {
            info!(masterclass_id = %masterclass.id, user_id = %user_id, "Reminder sent");
            report.record_sent(kind);
            delivered += 1;
        } else {
            error!(masterclass_id = %masterclass.id, user_id = %user_id, "Reminder failed");
            report.errors += 1;
        }
    }

    delivered
}

/// Spaces out the sends of a sweep by the configured delay
struct SendPacer<'a> {
    ctx: &'a MailerContext,
    has_sent: bool,
}

impl<'a> SendPacer<'a> {
    fn new(ctx: &'a MailerContext) -> Self {
        Self {
            ctx,
            has_sent: false,
        }
    }

    async fn wait(&mut self) {
        let delay = self.ctx.config.reminder_send_delay;
        if self.has_sent && !delay.is_zero() {
            actix_web::rt::time::sleep(delay).await;
        }
        self.has_sent = true;
    }
}
