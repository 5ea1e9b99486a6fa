mod mailer;
mod templates;

pub use mailer::{EmailTransport, IMailer, InMemoryMailer, SmtpMailer, SmtpTransport};
pub use templates::{EmailTemplates, TemplateError};
