use super::IMailer;
use masterclass_mailer_domain::OutboundEmail;
use std::sync::Mutex;

/// Mailer that keeps every delivered email in memory.
///
/// Recipients can be configured to fail so that delivery errors can be tested.
pub struct InMemoryMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    failing_recipients: Mutex<Vec<String>>,
    failing_subjects: Mutex<Vec<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(Vec::new()),
            failing_subjects: Mutex::new(Vec::new()),
        }
    }

    /// All the emails delivered so far in the order they were sent
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, recipient: &str) -> Vec<OutboundEmail> {
        self.sent()
            .into_iter()
            .filter(|email| email.to == recipient)
            .collect()
    }

    /// Every following send to `recipient` will fail
    pub fn fail_for(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .push(recipient.to_string());
    }

    /// Every following send of an email whose subject contains `text` will fail
    pub fn fail_for_subject(&self, text: &str) {
        self.failing_subjects.lock().unwrap().push(text.to_string());
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, email: &OutboundEmail) -> bool {
        if self.failing_recipients.lock().unwrap().contains(&email.to) {
            return false;
        }
        if self
            .failing_subjects
            .lock()
            .unwrap()
            .iter()
            .any(|text| email.subject.contains(text.as_str()))
        {
            return false;
        }
        self.sent.lock().unwrap().push(email.clone());
        true
    }
}
