use crate::error::MailerError;
use actix_web::HttpRequest;
use masterclass_mailer_infra::MailerContext;
use tracing::warn;

fn parse_authtoken_header(token_header_value: &str) -> Option<&str> {
    token_header_value.strip_prefix("Bearer ")
}

/// Only the cron trigger knowing the configured secret is allowed through
pub fn protect_cron_route(req: &HttpRequest, ctx: &MailerContext) -> Result<(), MailerError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|token| token.to_str().ok())
        .and_then(parse_authtoken_header);

    match token {
        Some(token) if token == ctx.config.cron_secret => Ok(()),
        _ => {
            warn!("Rejected reminder sweep trigger with missing or invalid secret");
            Err(MailerError::Unauthorized)
        }
    }
}
