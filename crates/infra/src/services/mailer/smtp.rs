use super::IMailer;
use crate::config::SmtpConfig;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use masterclass_mailer_domain::OutboundEmail;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Sends a single prebuilt message, abstracted so that tests can replace the SMTP relay
#[async_trait::async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send_email(&self, message: Message) -> Result<(), String>;
}

/// `EmailTransport` backed by a real SMTP connection
pub struct SmtpTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpTransport {
    pub fn new(transport: AsyncSmtpTransport<Tokio1Executor>) -> Self {
        Self { inner: transport }
    }
}

#[async_trait::async_trait]
impl EmailTransport for SmtpTransport {
    async fn send_email(&self, message: Message) -> Result<(), String> {
        self.inner
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

/// Mailer delivering through an SMTP relay.
///
/// Every attempt walks through the transports in order until one of them
/// accepts the message. The relay is first contacted over implicit TLS and
/// then over STARTTLS. A failed attempt is retried after a fixed delay until
/// the attempts are exhausted.
pub struct SmtpMailer {
    from: Mailbox,
    transports: Vec<(&'static str, Arc<dyn EmailTransport>)>,
    max_attempts: u32,
    retry_delay: Duration,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> anyhow::Result<Self> {
        let from = Mailbox::new(
            Some(config.from_name.clone()),
            config.username.parse::<Address>()?,
        );
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let implicit_tls: Arc<dyn EmailTransport> = Arc::new(SmtpTransport::new(
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
                .port(config.implicit_tls_port)
                .credentials(credentials.clone())
                .timeout(Some(config.timeout))
                .build(),
        ));
        let starttls: Arc<dyn EmailTransport> = Arc::new(SmtpTransport::new(
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
                .port(config.starttls_port)
                .credentials(credentials)
                .timeout(Some(config.timeout))
                .build(),
        ));

        Ok(Self::with_transports(
            from,
            vec![("implicit TLS", implicit_tls), ("STARTTLS", starttls)],
            config.max_attempts,
            config.retry_delay,
        ))
    }

    pub fn with_transports(
        from: Mailbox,
        transports: Vec<(&'static str, Arc<dyn EmailTransport>)>,
        max_attempts: u32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            from,
            transports,
            max_attempts,
            retry_delay,
        }
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, String> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| e.to_string())
    }

    /// Tries every transport once, returns the errors of the transports that failed
    async fn attempt(&self, message: &Message, recipient: &str) -> Result<(), Vec<String>> {
        let mut errors = Vec::with_capacity(self.transports.len());
        for (name, transport) in &self.transports {
            match transport.send_email(message.clone()).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(
                        recipient = %recipient,
                        transport = %name,
                        error = %e,
                        "SMTP transport failed, trying the next one"
                    );
                    errors.push(format!("{}: {}", name, e));
                }
            }
        }
        Err(errors)
    }
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    #[tracing::instrument(name = "Sending email", skip(self, email), fields(to = %email.to))]
    async fn send(&self, email: &OutboundEmail) -> bool {
        let message = match self.build_message(email) {
            Ok(message) => message,
            Err(e) => {
                error!("Unable to build email for {}: {}", email.to, e);
                return false;
            }
        };

        for attempt in 1..=self.max_attempts {
            match self.attempt(&message, &email.to).await {
                Ok(()) => {
                    info!("Email sent to {} (attempt {})", email.to, attempt);
                    return true;
                }
                Err(errors) => {
                    warn!(
                        attempt = attempt,
                        errors = ?errors,
                        "Failed to send email to {}", email.to
                    );
                    if attempt < self.max_attempts {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        error!(
            "Giving up on email to {} after {} attempts",
            email.to, self.max_attempts
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Transport failing a given number of times before it accepts messages
    struct MockEmailTransport {
        failures_left: AtomicU32,
        calls: AtomicU32,
        sent: Mutex<Vec<Message>>,
    }

    impl MockEmailTransport {
        fn failing(times: u32) -> Arc<Self> {
            Arc::new(Self {
                failures_left: AtomicU32::new(times),
                calls: AtomicU32::new(0),
                sent: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl EmailTransport for MockEmailTransport {
        async fn send_email(&self, message: Message) -> Result<(), String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let failures_left = self.failures_left.load(Ordering::SeqCst);
            if failures_left > 0 {
                self.failures_left.store(failures_left - 1, Ordering::SeqCst);
                return Err("connection refused".into());
            }
            self.sent.lock().unwrap().push(message);
            Ok(())
        }
    }

    fn mailer(tls: Arc<MockEmailTransport>, starttls: Arc<MockEmailTransport>) -> SmtpMailer {
        let tls: Arc<dyn EmailTransport> = tls;
        let starttls: Arc<dyn EmailTransport> = starttls;
        SmtpMailer::with_transports(
            "GrowPro <masterclasses@example.com>".parse().unwrap(),
            vec![("implicit TLS", tls), ("STARTTLS", starttls)],
            3,
            Duration::ZERO,
        )
    }

    fn email(to: &str) -> OutboundEmail {
        OutboundEmail {
            to: to.into(),
            subject: "⏰ Tomorrow: Intro to Kafka".into(),
            html_body: "<p>See you tomorrow!</p>".into(),
        }
    }

    #[tokio::test]
    async fn it_uses_implicit_tls_first() {
        let tls = MockEmailTransport::failing(0);
        let starttls = MockEmailTransport::failing(0);
        let mailer = mailer(tls.clone(), starttls.clone());

        assert!(mailer.send(&email("ada@example.com")).await);
        assert_eq!(tls.calls(), 1);
        assert_eq!(starttls.calls(), 0);

        let sent = tls.sent.lock().unwrap();
        let raw = String::from_utf8(sent[0].formatted()).unwrap();
        assert!(raw.contains("From: GrowPro <masterclasses@example.com>"));
        assert!(raw.contains("To: ada@example.com"));
        assert!(raw.contains("Content-Type: text/html"));
    }

    #[tokio::test]
    async fn it_falls_back_to_starttls_within_an_attempt() {
        let tls = MockEmailTransport::failing(u32::MAX);
        let starttls = MockEmailTransport::failing(0);
        let mailer = mailer(tls.clone(), starttls.clone());

        assert!(mailer.send(&email("ada@example.com")).await);
        assert_eq!(tls.calls(), 1);
        assert_eq!(starttls.calls(), 1);
    }

    #[tokio::test]
    async fn it_retries_failed_attempts() {
        let tls = MockEmailTransport::failing(2);
        let starttls = MockEmailTransport::failing(2);
        let mailer = mailer(tls.clone(), starttls.clone());

        assert!(mailer.send(&email("ada@example.com")).await);
        assert_eq!(tls.calls(), 3);
        assert_eq!(starttls.calls(), 2);
    }

    #[tokio::test]
    async fn it_gives_up_after_max_attempts() {
        let tls = MockEmailTransport::failing(u32::MAX);
        let starttls = MockEmailTransport::failing(u32::MAX);
        let mailer = mailer(tls.clone(), starttls.clone());

        assert!(!mailer.send(&email("ada@example.com")).await);
        assert_eq!(tls.calls(), 3);
        assert_eq!(starttls.calls(), 3);
    }

    #[tokio::test]
    async fn it_does_not_send_to_invalid_addresses() {
        let tls = MockEmailTransport::failing(0);
        let starttls = MockEmailTransport::failing(0);
        let mailer = mailer(tls.clone(), starttls.clone());

        assert!(!mailer.send(&email("not an address")).await);
        assert_eq!(tls.calls(), 0);
    }
}
