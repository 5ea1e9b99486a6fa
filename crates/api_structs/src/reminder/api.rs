use chrono::{DateTime, Utc};
use masterclass_mailer_domain::SweepReport;
use serde::{Deserialize, Serialize};

pub mod send_reminders {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub success: bool,
        #[serde(rename = "reminder24h")]
        pub reminder_24h: usize,
        #[serde(rename = "reminder2h")]
        pub reminder_2h: usize,
        pub errors: usize,
        pub skipped: usize,
        #[serde(rename = "processedClasses")]
        pub processed_classes: Vec<String>,
        pub timestamp: DateTime<Utc>,
    }

    impl APIResponse {
        pub fn new(report: SweepReport, timestamp: DateTime<Utc>) -> Self {
            Self {
                success: true,
                reminder_24h: report.sent_24h,
                reminder_2h: report.sent_2h,
                errors: report.errors,
                skipped: report.skipped,
                processed_classes: report.processed_titles,
                timestamp,
            }
        }
    }
}
