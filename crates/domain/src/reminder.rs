use chrono::{DateTime, Duration, Utc};

/// The two classes of reminders that are sent ahead of an upcoming `Masterclass`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderKind {
    /// Sent when the `Masterclass` starts in roughly 24 hours
    DayBefore,
    /// Sent when the `Masterclass` starts in roughly 2 hours
    TwoHoursBefore,
}

impl ReminderKind {
    pub const ALL: [ReminderKind; 2] = [ReminderKind::DayBefore, ReminderKind::TwoHoursBefore];

    /// Key of this reminder class in the `remindersSent` map of the stored document
    pub fn flag_key(&self) -> &'static str {
        match self {
            Self::DayBefore => "24h",
            Self::TwoHoursBefore => "2h",
        }
    }

    /// The `ReminderWindow` relative to `now` in which a `Masterclass` has to be
    /// scheduled for this reminder class to be eligible
    pub fn window(&self, now: DateTime<Utc>) -> ReminderWindow {
        match self {
            Self::DayBefore => ReminderWindow::new(now, Duration::hours(23), Duration::hours(25)),
            Self::TwoHoursBefore => {
                ReminderWindow::new(now, Duration::minutes(90), Duration::minutes(150))
            }
        }
    }
}

/// An interval of wall clock time ahead of some point in time. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReminderWindow {
    pub fn new(now: DateTime<Utc>, from: Duration, to: Duration) -> Self {
        Self {
            start: now + from,
            end: now + to,
        }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Tracks which reminder classes have already been sent for a `Masterclass`.
///
/// A flag that has been set is never unset again by this service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemindersSent {
    pub day_before: bool,
    pub day_before_at: Option<DateTime<Utc>>,
    pub two_hours_before: bool,
    pub two_hours_before_at: Option<DateTime<Utc>>,
}

impl RemindersSent {
    pub fn is_sent(&self, kind: ReminderKind) -> bool {
        match kind {
            ReminderKind::DayBefore => self.day_before,
            ReminderKind::TwoHoursBefore => self.two_hours_before,
        }
    }

    pub fn sent_at(&self, kind: ReminderKind) -> Option<DateTime<Utc>> {
        match kind {
            ReminderKind::DayBefore => self.day_before_at,
            ReminderKind::TwoHoursBefore => self.two_hours_before_at,
        }
    }

    pub fn apply(&mut self, update: &RemindersSentUpdate) {
        if let Some(sent_at) = update.day_before {
            self.day_before = true;
            self.day_before_at = Some(sent_at);
        }
        if let Some(sent_at) = update.two_hours_before {
            self.two_hours_before = true;
            self.two_hours_before_at = Some(sent_at);
        }
    }
}

/// Partial update of the reminder flags of a `Masterclass`.
///
/// Every reminder class present in the update is marked as sent at the given
/// timestamp, absent classes are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemindersSentUpdate {
    pub day_before: Option<DateTime<Utc>>,
    pub two_hours_before: Option<DateTime<Utc>>,
}

impl RemindersSentUpdate {
    pub fn is_empty(&self) -> bool {
        self.day_before.is_none() && self.two_hours_before.is_none()
    }

    /// The reminder classes in this update together with their send timestamp
    pub fn entries(&self) -> Vec<(ReminderKind, DateTime<Utc>)> {
        ReminderKind::ALL
            .iter()
            .filter_map(|kind| {
                let sent_at = match kind {
                    ReminderKind::DayBefore => self.day_before,
                    ReminderKind::TwoHoursBefore => self.two_hours_before,
                };
                sent_at.map(|ts| (*kind, ts))
            })
            .collect()
    }
}

/// The reminder classes that should be sent for a `Masterclass` during a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueReminders {
    pub day_before: bool,
    pub two_hours_before: bool,
}

impl DueReminders {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !self.day_before && !self.two_hours_before
    }

    /// The reminder class whose email should be sent to the participants.
    /// The day before reminder takes precedence, although the windows
    /// never overlap in practice.
    pub fn primary(&self) -> Option<ReminderKind> {
        if self.day_before {
            Some(ReminderKind::DayBefore)
        } else if self.two_hours_before {
            Some(ReminderKind::TwoHoursBefore)
        } else {
            None
        }
    }

    pub fn to_update(&self, sent_at: DateTime<Utc>) -> RemindersSentUpdate {
        RemindersSentUpdate {
            day_before: if self.day_before { Some(sent_at) } else { None },
            two_hours_before: if self.two_hours_before {
                Some(sent_at)
            } else {
                None
            },
        }
    }
}

/// Outcome of one reminder sweep over all masterclasses
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    pub sent_24h: usize,
    pub sent_2h: usize,
    pub errors: usize,
    pub skipped: usize,
    /// Titles of the masterclasses that had reminders due and participants to notify
    pub processed_titles: Vec<String>,
}

impl SweepReport {
    pub fn record_sent(&mut self, kind: ReminderKind) {
        match kind {
            ReminderKind::DayBefore => self.sent_24h += 1,
            ReminderKind::TwoHoursBefore => self.sent_2h += 1,
        }
    }
}
