mod date;
mod email;
mod masterclass;
mod purchase;
mod registration;
mod reminder;
mod shared;
mod user_profile;

pub use date::parse_timestamp;
pub use email::OutboundEmail;
pub use masterclass::{Masterclass, MasterclassType};
pub use purchase::{format_amount, Purchase, PurchaseType};
pub use registration::Registration;
pub use reminder::{
    DueReminders, ReminderKind, ReminderWindow, RemindersSent, RemindersSentUpdate, SweepReport,
};
pub use shared::entity::{Entity, ID};
pub use user_profile::UserProfile;
