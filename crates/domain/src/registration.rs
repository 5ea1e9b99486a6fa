use chrono::{DateTime, Utc};

/// Registrations for masterclasses starting within this many hours
/// also get an immediate "starting now" reminder
const IMMEDIATE_REMINDER_HOURS: f64 = 2.0;

/// A user's registration for an upcoming `Masterclass`
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub user_name: String,
    pub masterclass_title: String,
    pub speaker_name: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub masterclass_id: Option<String>,
}

impl Registration {
    /// Fractional hours until the masterclass starts, `None` when it is not scheduled yet
    pub fn hours_until_event(&self, now: DateTime<Utc>) -> Option<f64> {
        self.scheduled_date
            .map(|date| (date - now).num_milliseconds() as f64 / (1000.0 * 60.0 * 60.0))
    }

    /// Whole minutes until the masterclass starts, never negative
    pub fn minutes_until_event(&self, now: DateTime<Utc>) -> Option<i64> {
        self.hours_until_event(now)
            .map(|hours| ((hours * 60.0) as i64).max(0))
    }

    pub fn needs_immediate_reminder(&self, now: DateTime<Utc>) -> bool {
        matches!(self.hours_until_event(now), Some(hours) if hours <= IMMEDIATE_REMINDER_HOURS)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn registration(scheduled_date: Option<DateTime<Utc>>) -> Registration {
        Registration {
            user_name: "".into(),
            masterclass_title: "Intro to Kafka".into(),
            speaker_name: Some("Grace".into()),
            scheduled_date,
            masterclass_id: Some("mc-1".into()),
        }
    }

    #[test]
    fn soon_starting_registration_needs_immediate_reminder() {
        let r = registration(Some(now() + Duration::minutes(90)));
        assert_eq!(r.hours_until_event(now()), Some(1.5));
        assert_eq!(r.minutes_until_event(now()), Some(90));
        assert!(r.needs_immediate_reminder(now()));

        let r = registration(Some(now() + Duration::hours(2)));
        assert!(r.needs_immediate_reminder(now()));
    }

    #[test]
    fn later_or_unscheduled_registration_does_not_need_immediate_reminder() {
        let r = registration(Some(now() + Duration::hours(2) + Duration::seconds(1)));
        assert!(!r.needs_immediate_reminder(now()));

        let r = registration(None);
        assert_eq!(r.hours_until_event(now()), None);
        assert!(!r.needs_immediate_reminder(now()));
    }

    #[test]
    fn minutes_until_event_is_never_negative() {
        let r = registration(Some(now() - Duration::minutes(10)));
        assert_eq!(r.minutes_until_event(now()), Some(0));
    }
}
