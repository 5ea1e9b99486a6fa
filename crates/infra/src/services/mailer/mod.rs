mod inmemory;
mod smtp;

pub use inmemory::InMemoryMailer;
use masterclass_mailer_domain::OutboundEmail;
pub use smtp::{EmailTransport, SmtpMailer, SmtpTransport};

/// Delivers rendered emails to their recipients.
///
/// Delivery failures are never raised to the caller, `send` returns `false`
/// when the email could not be delivered.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> bool;
}
