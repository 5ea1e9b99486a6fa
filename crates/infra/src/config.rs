use chrono_tz::Tz;
use masterclass_mailer_utils::create_random_secret;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("The {0} environment variable must be set")]
    Missing(&'static str),
    #[error("The {0} environment variable has an invalid value: `{1}`")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Display name used in the `From` header together with `username`
    pub from_name: String,
    /// Port for connections that are encrypted from the start (SMTPS)
    pub implicit_tls_port: u16,
    /// Port for plain connections upgraded with STARTTLS, tried when the
    /// implicit TLS connection fails
    pub starttls_port: u16,
    /// Socket timeout of a single SMTP connection
    pub timeout: Duration,
    /// How many times a send is attempted before giving up
    pub max_attempts: u32,
    /// Fixed pause between two attempts
    pub retry_delay: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Number of http workers
    pub workers: usize,
    /// Base url of the registration platform, used to build links in emails
    pub base_url: String,
    /// Shared secret the cron trigger has to present as a bearer token
    pub cron_secret: String,
    pub smtp: SmtpConfig,
    /// Timezone used to display dates and times in emails
    pub display_timezone: Tz,
    /// Pause between two reminder emails of a sweep. Some relays throttle
    /// senders that deliver many messages in a short time.
    pub reminder_send_delay: Duration,
    /// Runs the reminder sweep inside the process at this interval when set.
    /// When it is not set the sweep is only triggered through the cron endpoint.
    pub reminder_sweep_interval: Option<Duration>,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the config with the given lookup of environment variables
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let cron_secret = match var("CRON_SECRET") {
            Some(secret) => secret,
            None => {
                info!("Did not find CRON_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("Secret for triggering the reminder sweep was generated and set to: {}", secret);
                secret
            }
        };

        let default_port = 5000;
        let port = match var("PORT") {
            Some(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
            None => default_port,
        };

        let base_url = var("BASE_URL")
            .or_else(|| var("NEXT_PUBLIC_BASE_URL"))
            .ok_or(ConfigError::Missing("BASE_URL"))?
            .trim_end_matches('/')
            .to_string();

        let display_timezone = match var("EMAIL_TIMEZONE") {
            Some(tz) => tz
                .parse::<Tz>()
                .map_err(|_| ConfigError::Invalid("EMAIL_TIMEZONE", tz))?,
            None => Tz::UTC,
        };

        let smtp = SmtpConfig {
            host: var("SMTP_HOST").unwrap_or_else(|| "smtp.gmail.com".into()),
            username: var("EMAIL_USER").ok_or(ConfigError::Missing("EMAIL_USER"))?,
            password: var("EMAIL_PASSWORD").ok_or(ConfigError::Missing("EMAIL_PASSWORD"))?,
            from_name: var("EMAIL_FROM_NAME").unwrap_or_else(|| "GrowPro".into()),
            implicit_tls_port: parse_var(&var, "SMTP_TLS_PORT", 465)?,
            starttls_port: parse_var(&var, "SMTP_STARTTLS_PORT", 587)?,
            timeout: Duration::from_secs(parse_var(&var, "SMTP_TIMEOUT_SECS", 30)?),
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
        };

        let reminder_sweep_interval = match var("REMINDER_SWEEP_INTERVAL_SECS") {
            Some(_) => Some(Duration::from_secs(parse_var(
                &var,
                "REMINDER_SWEEP_INTERVAL_SECS",
                0,
            )?))
            .filter(|interval| !interval.is_zero()),
            None => None,
        };

        Ok(Self {
            port,
            workers: parse_var(&var, "WORKERS", 2)?,
            base_url,
            cron_secret,
            smtp,
            display_timezone,
            reminder_send_delay: Duration::from_millis(parse_var(
                &var,
                "REMINDER_SEND_DELAY_MS",
                0,
            )?),
            reminder_sweep_interval,
        })
    }

    /// Config used by tests and local development without an SMTP relay
    pub fn local() -> Self {
        Self {
            port: 5000,
            workers: 1,
            base_url: "http://localhost:3000".into(),
            cron_secret: create_random_secret(32),
            smtp: SmtpConfig {
                host: "localhost".into(),
                username: "masterclasses@example.com".into(),
                password: "".into(),
                from_name: "GrowPro".into(),
                implicit_tls_port: 465,
                starttls_port: 587,
                timeout: Duration::from_secs(30),
                max_attempts: 3,
                retry_delay: Duration::from_secs(2),
            },
            display_timezone: Tz::UTC,
            reminder_send_delay: Duration::ZERO,
            reminder_sweep_interval: None,
        }
    }
}

fn parse_var<F, T>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(key) {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid(key, value)),
        None => Ok(default),
    }
}
