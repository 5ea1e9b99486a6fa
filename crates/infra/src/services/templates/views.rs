use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DayBeforeReminderView<'a> {
    pub greeting_name: &'a str,
    pub title: &'a str,
    pub speaker_name: Option<&'a str>,
    pub scheduled: String,
    pub details_url: String,
    pub footer_note: String,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct TwoHoursReminderView<'a> {
    pub greeting_name: &'a str,
    pub title: &'a str,
    pub speaker_name: Option<&'a str>,
    pub scheduled: String,
    pub live_url: String,
    pub footer_note: String,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct PurchaseConfirmationView<'a> {
    pub greeting_name: &'a str,
    pub is_paid: bool,
    pub is_video: bool,
    pub is_upcoming: bool,
    pub item_title: &'a str,
    pub masterclass_title: &'a str,
    pub amount: String,
    pub order_id: &'a str,
    pub payment_id: Option<&'a str>,
    pub purchased_at: String,
    pub details_url: String,
    pub footer_note: String,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct RegistrationConfirmationView<'a> {
    pub greeting_name: &'a str,
    pub title: &'a str,
    pub speaker_name: Option<&'a str>,
    pub scheduled: String,
    pub is_scheduled: bool,
    pub starting_soon: bool,
    pub hours_until_event: i64,
    pub details_url: String,
    pub footer_note: String,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct ImmediateReminderView<'a> {
    pub greeting_name: &'a str,
    pub title: &'a str,
    pub speaker_name: Option<&'a str>,
    pub scheduled: String,
    pub minutes_until_event: i64,
    pub live_url: String,
    pub footer_note: String,
    pub year: i32,
}
