mod base;
mod notification;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use notification::NotificationClient;
pub use notification::{SendPurchaseConfirmationInput, SendRegistrationEmailInput};
use reminder::ReminderClient;
use status::StatusClient;
use std::sync::Arc;

pub use masterclass_mailer_api_structs::get_service_health::APIResponse as ServiceHealth;
pub use masterclass_mailer_api_structs::send_reminders::APIResponse as SweepResult;

/// Masterclass Mailer SDK
///
/// The SDK contains methods for interacting with the masterclass mailer
/// API.
#[derive(Clone)]
pub struct MailerSDK {
    pub notification: NotificationClient,
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl MailerSDK {
    pub fn new(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }

    /// SDK that is allowed to trigger reminder sweeps
    pub fn with_cron_secret<T: Into<String>>(address: String, cron_secret: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_cron_secret(cron_secret.into());
        Self::create(base)
    }

    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let notification = NotificationClient::new(base.clone());
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            notification,
            reminder,
            status,
        }
    }
}
