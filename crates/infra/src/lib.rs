mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, ConfigError, SmtpConfig};
pub use repos::{IMasterclassRepo, IUserProfileRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

#[derive(Clone)]
pub struct MailerContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub mailer: Arc<dyn IMailer>,
    pub templates: Arc<EmailTemplates>,
}

struct ContextParams {
    pub mongodb_connection_string: String,
    pub mongodb_db_name: String,
}

impl MailerContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let config = Config::new()?;
        let repos = Repos::create_mongodb(
            &params.mongodb_connection_string,
            &params.mongodb_db_name,
        )
        .await?;
        let mailer = SmtpMailer::new(&config.smtp)?;
        let templates = EmailTemplates::new(&config)?;
        info!(
            "Sending emails as {} through {}",
            config.smtp.username, config.smtp.host
        );

        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(mailer),
            templates: Arc::new(templates),
        })
    }

    /// Context with in memory repositories and a mailer that only records
    /// what it was asked to send
    pub fn create_inmemory() -> Self {
        let config = Config::local();
        let templates = EmailTemplates::new(&config).expect("Bundled email templates to be valid");
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            mailer: Arc::new(InMemoryMailer::new()),
            templates: Arc::new(templates),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<MailerContext> {
    MailerContext::create(ContextParams {
        mongodb_connection_string: get_env_var("MONGODB_CONNECTION_STRING")?,
        mongodb_db_name: get_env_var("MONGODB_NAME")?,
    })
    .await
}

fn get_env_var(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("{} env var to be present.", key))
}
