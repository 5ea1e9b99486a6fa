mod views;

use crate::config::Config;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use handlebars::Handlebars;
use masterclass_mailer_domain::{Masterclass, OutboundEmail, Purchase, ReminderKind, Registration};
use serde::Serialize;
use thiserror::Error;
use views::*;

const DAY_BEFORE_REMINDER: &str = "day_before_reminder";
const TWO_HOURS_REMINDER: &str = "two_hours_reminder";
const PURCHASE_CONFIRMATION: &str = "purchase_confirmation";
const REGISTRATION_CONFIRMATION: &str = "registration_confirmation";
const IMMEDIATE_REMINDER: &str = "immediate_reminder";

const FULL_DATE_FORMAT: &str = "%A, %B %d, %Y at %I:%M %p %Z";
const TIME_FORMAT: &str = "%I:%M %p %Z";
const RECEIPT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Invalid email template: {0}")]
    Invalid(#[from] handlebars::TemplateError),
    #[error("Unable to render email template: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Renders the HTML emails sent by the service.
///
/// Each email kind has its own view model which is filled from the domain
/// types, so that the templates only contain cosmetic conditionals.
pub struct EmailTemplates {
    handlebars: Handlebars<'static>,
    base_url: String,
    support_email: String,
    timezone: Tz,
}

impl EmailTemplates {
    pub fn new(config: &Config) -> Result<Self, TemplateError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        handlebars.register_partial("styles", include_str!("../../../templates/partials/styles.hbs"))?;
        handlebars.register_partial("footer", include_str!("../../../templates/partials/footer.hbs"))?;
        handlebars.register_template_string(
            DAY_BEFORE_REMINDER,
            include_str!("../../../templates/day_before_reminder.hbs"),
        )?;
        handlebars.register_template_string(
            TWO_HOURS_REMINDER,
            include_str!("../../../templates/two_hours_reminder.hbs"),
        )?;
        handlebars.register_template_string(
            PURCHASE_CONFIRMATION,
            include_str!("../../../templates/purchase_confirmation.hbs"),
        )?;
        handlebars.register_template_string(
            REGISTRATION_CONFIRMATION,
            include_str!("../../../templates/registration_confirmation.hbs"),
        )?;
        handlebars.register_template_string(
            IMMEDIATE_REMINDER,
            include_str!("../../../templates/immediate_reminder.hbs"),
        )?;

        Ok(Self {
            handlebars,
            base_url: config.base_url.clone(),
            support_email: config.smtp.username.clone(),
            timezone: config.display_timezone,
        })
    }

    /// Reminder sent ahead of a `Masterclass` to one of its participants
    pub fn reminder(
        &self,
        kind: ReminderKind,
        masterclass: &Masterclass,
        to: &str,
        user_name: &str,
        now: DateTime<Utc>,
    ) -> Result<OutboundEmail, TemplateError> {
        let greeting_name = greeting_name(user_name);
        let speaker_name = non_blank(masterclass.speaker_name.as_deref());
        let details_url = self.details_url(Some(masterclass.id.as_str()));

        let (subject, html_body) = match kind {
            ReminderKind::DayBefore => (
                format!("⏰ Tomorrow: {}", masterclass.title),
                self.render(
                    DAY_BEFORE_REMINDER,
                    &DayBeforeReminderView {
                        greeting_name,
                        title: &masterclass.title,
                        speaker_name,
                        scheduled: self.format_date(masterclass.scheduled_date, FULL_DATE_FORMAT),
                        details_url,
                        footer_note: "This is an automated reminder. You registered for this event."
                            .into(),
                        year: self.year(now),
                    },
                )?,
            ),
            ReminderKind::TwoHoursBefore => (
                format!("🚨 STARTING IN 2 HOURS: {}", masterclass.title),
                self.render(
                    TWO_HOURS_REMINDER,
                    &TwoHoursReminderView {
                        greeting_name,
                        title: &masterclass.title,
                        speaker_name,
                        scheduled: self.format_date(masterclass.scheduled_date, TIME_FORMAT),
                        live_url: format!("{}/live", details_url),
                        footer_note: self.trouble_joining_note(),
                        year: self.year(now),
                    },
                )?,
            ),
        };

        Ok(OutboundEmail {
            to: to.into(),
            subject,
            html_body,
        })
    }

    pub fn purchase_confirmation(
        &self,
        to: &str,
        purchase: &Purchase,
        now: DateTime<Utc>,
    ) -> Result<OutboundEmail, TemplateError> {
        let subject = format!(
            "{} {} {} Confirmed - {}",
            if purchase.is_paid() { "💳" } else { "✅" },
            if purchase.is_video() { "Video" } else { "Masterclass" },
            if purchase.is_paid() { "Purchase" } else { "Enrollment" },
            purchase.item_title()
        );

        let html_body = self.render(
            PURCHASE_CONFIRMATION,
            &PurchaseConfirmationView {
                greeting_name: greeting_name(&purchase.user_name),
                is_paid: purchase.is_paid(),
                is_video: purchase.is_video(),
                is_upcoming: purchase.is_upcoming_registration(),
                item_title: purchase.item_title(),
                masterclass_title: &purchase.masterclass_title,
                amount: purchase.formatted_amount(),
                order_id: purchase.order_id.as_deref().unwrap_or("N/A"),
                payment_id: non_blank(purchase.payment_id.as_deref()),
                purchased_at: now
                    .with_timezone(&self.timezone)
                    .format(RECEIPT_DATE_FORMAT)
                    .to_string(),
                details_url: self.details_url(purchase.masterclass_id.as_deref()),
                footer_note: format!("Need help? Contact us at {}", self.support_email),
                year: self.year(now),
            },
        )?;

        Ok(OutboundEmail {
            to: to.into(),
            subject,
            html_body,
        })
    }

    pub fn registration_confirmation(
        &self,
        to: &str,
        registration: &Registration,
        now: DateTime<Utc>,
    ) -> Result<OutboundEmail, TemplateError> {
        let hours_until_event = registration.hours_until_event(now);

        let html_body = self.render(
            REGISTRATION_CONFIRMATION,
            &RegistrationConfirmationView {
                greeting_name: greeting_name(&registration.user_name),
                title: &registration.masterclass_title,
                speaker_name: non_blank(registration.speaker_name.as_deref()),
                scheduled: self.format_date(registration.scheduled_date, FULL_DATE_FORMAT),
                is_scheduled: hours_until_event.is_some(),
                starting_soon: registration.needs_immediate_reminder(now),
                hours_until_event: hours_until_event.map(|hours| hours as i64).unwrap_or(0),
                details_url: self.details_url(registration.masterclass_id.as_deref()),
                footer_note: "This is an automated email. Please do not reply.".into(),
                year: self.year(now),
            },
        )?;

        Ok(OutboundEmail {
            to: to.into(),
            subject: format!("✅ Registration Confirmed: {}", registration.masterclass_title),
            html_body,
        })
    }

    /// Sent right after the registration when the `Masterclass` is about to start
    pub fn immediate_reminder(
        &self,
        to: &str,
        registration: &Registration,
        now: DateTime<Utc>,
    ) -> Result<OutboundEmail, TemplateError> {
        let html_body = self.render(
            IMMEDIATE_REMINDER,
            &ImmediateReminderView {
                greeting_name: greeting_name(&registration.user_name),
                title: &registration.masterclass_title,
                speaker_name: non_blank(registration.speaker_name.as_deref()),
                scheduled: self.format_date(registration.scheduled_date, TIME_FORMAT),
                minutes_until_event: registration.minutes_until_event(now).unwrap_or(0),
                live_url: format!(
                    "{}/live",
                    self.details_url(registration.masterclass_id.as_deref())
                ),
                footer_note: self.trouble_joining_note(),
                year: self.year(now),
            },
        )?;

        Ok(OutboundEmail {
            to: to.into(),
            subject: format!("🚨 STARTING NOW: {}", registration.masterclass_title),
            html_body,
        })
    }

    fn render<T: Serialize>(&self, template: &str, view: &T) -> Result<String, TemplateError> {
        Ok(self.handlebars.render(template, view)?)
    }

    fn details_url(&self, masterclass_id: Option<&str>) -> String {
        match non_blank(masterclass_id) {
            Some(id) => format!("{}/masterclasses/{}", self.base_url, id),
            None => format!("{}/masterclasses", self.base_url),
        }
    }

    fn format_date(&self, date: Option<DateTime<Utc>>, format: &str) -> String {
        match date {
            Some(date) => date.with_timezone(&self.timezone).format(format).to_string(),
            None => "TBA".into(),
        }
    }

    fn year(&self, now: DateTime<Utc>) -> i32 {
        now.with_timezone(&self.timezone).year()
    }

    fn trouble_joining_note(&self) -> String {
        format!("Having trouble joining? Contact us at {}", self.support_email)
    }
}

fn greeting_name(user_name: &str) -> &str {
    match user_name.trim() {
        "" => "there",
        name => name,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
