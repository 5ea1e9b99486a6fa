use chrono::{DateTime, TimeZone, Utc};
use masterclass_mailer_api::Application;
use masterclass_mailer_infra::{InMemoryMailer, MailerContext, StaticTimeSys};
use masterclass_mailer_sdk::MailerSDK;
use std::sync::Arc;

pub struct TestApp {
    pub ctx: MailerContext,
    pub mailer: Arc<InMemoryMailer>,
    pub address: String,
}

impl TestApp {
    /// Sdk that presents the cron secret of the running application
    pub fn cron_sdk(&self) -> MailerSDK {
        MailerSDK::with_cron_secret(self.address.clone(), self.ctx.config.cron_secret.clone())
    }
}

/// The point in time the application under test believes it is
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, MailerSDK) {
    let mut ctx = MailerContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.sys = Arc::new(StaticTimeSys::at(now()));
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.mailer = mailer.clone();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = MailerSDK::new(address.clone());
    let app = TestApp {
        ctx,
        mailer,
        address,
    };
    (app, sdk)
}
