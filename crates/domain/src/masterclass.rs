use crate::{
    reminder::{DueReminders, ReminderKind, RemindersSent, RemindersSentUpdate},
    shared::entity::{Entity, ID},
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterclassType {
    Upcoming,
    Free,
    Paid,
    Featured,
    Other(String),
}

impl MasterclassType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Free => "free",
            Self::Paid => "paid",
            Self::Featured => "featured",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for MasterclassType {
    fn from(value: &str) -> Self {
        match value {
            "upcoming" => Self::Upcoming,
            "free" => Self::Free,
            "paid" => Self::Paid,
            "featured" => Self::Featured,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A `Masterclass` is a scheduled live event owned by the registration platform.
///
/// This service only reads it and updates its `reminders_sent` flags.
#[derive(Debug, Clone)]
pub struct Masterclass {
    pub id: ID,
    pub title: String,
    pub speaker_name: Option<String>,
    pub masterclass_type: MasterclassType,
    pub scheduled_date: Option<DateTime<Utc>>,
    /// Ids of the `UserProfile`s registered for this `Masterclass`
    pub joined_users: Vec<ID>,
    pub reminders_sent: RemindersSent,
}

impl Masterclass {
    pub fn new(id: ID, title: &str, masterclass_type: MasterclassType) -> Self {
        Self {
            id,
            title: title.to_string(),
            speaker_name: None,
            masterclass_type,
            scheduled_date: None,
            joined_users: Vec::new(),
            reminders_sent: Default::default(),
        }
    }

    pub fn is_upcoming(&self) -> bool {
        self.masterclass_type == MasterclassType::Upcoming
    }

    /// Computes which reminder classes should be sent for this `Masterclass` at `now`.
    ///
    /// Only upcoming masterclasses with a scheduled date that has not passed yet
    /// are eligible, and a reminder class that is already flagged as sent is never due again.
    pub fn due_reminders(&self, now: DateTime<Utc>) -> DueReminders {
        if !self.is_upcoming() {
            return DueReminders::none();
        }
        let scheduled_date = match self.scheduled_date {
            Some(date) if date >= now => date,
            _ => return DueReminders::none(),
        };

        let is_due = |kind: ReminderKind| {
            kind.window(now).contains(scheduled_date) && !self.reminders_sent.is_sent(kind)
        };

        DueReminders {
            day_before: is_due(ReminderKind::DayBefore),
            two_hours_before: is_due(ReminderKind::TwoHoursBefore),
        }
    }

    pub fn apply_reminders_update(&mut self, update: &RemindersSentUpdate) {
        self.reminders_sent.apply(update);
    }
}

impl Entity for Masterclass {
    fn id(&self) -> &ID {
        &self.id
    }
}
