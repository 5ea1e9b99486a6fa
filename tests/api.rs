mod helpers;

use chrono::Duration;
use helpers::setup::{now, spawn_app};
use masterclass_mailer_domain::{Masterclass, MasterclassType, ReminderKind, UserProfile, ID};
use masterclass_mailer_sdk::{
    APIErrorVariant, MailerSDK, SendPurchaseConfirmationInput, SendRegistrationEmailInput,
};

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk) = spawn_app().await;
    let health = sdk
        .status
        .check_health()
        .await
        .expect("Expected service to be healthy");
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "email-service");
    assert_eq!(health.timestamp, now());
}

#[actix_web::main]
#[test]
async fn test_send_reminders_requires_cron_secret() {
    let (app, sdk) = spawn_app().await;

    let res = sdk.reminder.send_reminders().await;
    assert_eq!(
        res.expect_err("Expected sweep without secret to be rejected")
            .variant,
        APIErrorVariant::Unauthorized
    );

    let wrong_secret_sdk = MailerSDK::with_cron_secret(app.address.clone(), "not-the-secret");
    let res = wrong_secret_sdk.reminder.send_reminders().await;
    assert_eq!(
        res.expect_err("Expected sweep with wrong secret to be rejected")
            .variant,
        APIErrorVariant::Unauthorized
    );

    assert!(app.cron_sdk().reminder.send_reminders().await.is_ok());
    assert!(app.mailer.sent().is_empty());
}

#[actix_web::main]
#[test]
async fn test_send_reminders_once_per_window() {
    let (app, _) = spawn_app().await;
    let repos = &app.ctx.repos;

    for (id, email, name) in [
        ("user-1", Some("ada@example.com"), Some("Ada")),
        ("user-2", Some("grace@example.com"), None),
        ("user-3", None, Some("No Email")),
    ] {
        repos
            .user_profiles
            .insert(&UserProfile::new(id.into(), email, name))
            .await
            .unwrap();
    }

    let mut tomorrow = Masterclass::new("mc-1".into(), "Intro to Kafka", MasterclassType::Upcoming);
    tomorrow.scheduled_date = Some(now() + Duration::hours(24));
    tomorrow.speaker_name = Some("Jay".into());
    tomorrow.joined_users = vec!["user-1".into(), "user-2".into(), "user-3".into()];
    repos.masterclasses.insert(&tomorrow).await.unwrap();

    let mut next_week = Masterclass::new("mc-2".into(), "Rust Async", MasterclassType::Upcoming);
    next_week.scheduled_date = Some(now() + Duration::days(7));
    next_week.joined_users = vec!["user-1".into()];
    repos.masterclasses.insert(&next_week).await.unwrap();

    let sdk = app.cron_sdk();
    let res = sdk
        .reminder
        .send_reminders()
        .await
        .expect("Expected sweep to succeed");
    assert!(res.success);
    assert_eq!(res.reminder_24h, 2);
    assert_eq!(res.reminder_2h, 0);
    assert_eq!(res.skipped, 1);
    assert_eq!(res.errors, 0);
    assert_eq!(res.processed_classes, vec!["Intro to Kafka".to_string()]);

    let sent = app.mailer.sent_to("grace@example.com");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "⏰ Tomorrow: Intro to Kafka");
    assert!(sent[0].html_body.contains("Hi there"));

    let stored = repos
        .masterclasses
        .find(&ID::from("mc-1"))
        .await
        .unwrap()
        .expect("Expected masterclass to exist");
    assert!(stored.reminders_sent.is_sent(ReminderKind::DayBefore));
    assert!(!stored.reminders_sent.is_sent(ReminderKind::TwoHoursBefore));

    // Running the sweep again within the same window sends nothing
    let res = sdk
        .reminder
        .send_reminders()
        .await
        .expect("Expected sweep to succeed");
    assert_eq!(res.reminder_24h, 0);
    assert!(res.processed_classes.is_empty());
    assert_eq!(app.mailer.sent().len(), 2);
}

#[actix_web::main]
#[test]
async fn test_send_purchase_confirmation() {
    let (app, sdk) = spawn_app().await;

    let res = sdk
        .notification
        .send_purchase_confirmation(SendPurchaseConfirmationInput {
            email: "ada@example.com".into(),
            user_name: Some("Ada".into()),
            masterclass_title: "Systems Design".into(),
            amount: Some(499.0),
            order_id: Some("order_1".into()),
            payment_id: Some("pay_1".into()),
            masterclass_id: Some("mc-1".into()),
            ..Default::default()
        })
        .await
        .expect("Expected purchase confirmation to be sent");
    assert!(res.success);

    let sent = app.mailer.sent_to("ada@example.com");
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].subject,
        "💳 Masterclass Purchase Confirmed - Systems Design"
    );
    assert!(sent[0]
        .html_body
        .contains("http://localhost:3000/masterclasses/mc-1"));
}

#[actix_web::main]
#[test]
async fn test_send_purchase_confirmation_with_missing_fields() {
    let (app, sdk) = spawn_app().await;

    let err = sdk
        .notification
        .send_purchase_confirmation(SendPurchaseConfirmationInput {
            email: "ada@example.com".into(),
            masterclass_title: "".into(),
            ..Default::default()
        })
        .await
        .expect_err("Expected purchase confirmation to be rejected");
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
    assert_eq!(err.message, "Missing required fields");
    assert!(app.mailer.sent().is_empty());
}

#[actix_web::main]
#[test]
async fn test_send_purchase_confirmation_delivery_failure() {
    let (app, sdk) = spawn_app().await;
    app.mailer.fail_for("ada@example.com");

    let err = sdk
        .notification
        .send_purchase_confirmation(SendPurchaseConfirmationInput {
            email: "ada@example.com".into(),
            masterclass_title: "Systems Design".into(),
            ..Default::default()
        })
        .await
        .expect_err("Expected purchase confirmation to fail");
    assert_eq!(err.variant, APIErrorVariant::InternalError);
    assert_eq!(err.message, "Failed to send email");
}

#[actix_web::main]
#[test]
async fn test_send_registration_email_for_soon_starting_masterclass() {
    let (app, sdk) = spawn_app().await;

    let res = sdk
        .notification
        .send_registration_email(SendRegistrationEmailInput {
            email: "ada@example.com".into(),
            masterclass_title: "Intro to Kafka".into(),
            speaker_name: Some("Jay".into()),
            scheduled_date: Some((now() + Duration::minutes(45)).to_rfc3339()),
            masterclass_id: Some("mc-1".into()),
            user_name: Some("Ada".into()),
        })
        .await
        .expect("Expected registration email to be sent");
    assert!(res.success);
    assert!(res.immediate_reminder_sent);

    let subjects: Vec<_> = app
        .mailer
        .sent_to("ada@example.com")
        .into_iter()
        .map(|email| email.subject)
        .collect();
    assert_eq!(
        subjects,
        vec![
            "✅ Registration Confirmed: Intro to Kafka".to_string(),
            "🚨 STARTING NOW: Intro to Kafka".to_string(),
        ]
    );
}

#[actix_web::main]
#[test]
async fn test_send_registration_email_for_later_masterclass() {
    let (app, sdk) = spawn_app().await;

    let res = sdk
        .notification
        .send_registration_email(SendRegistrationEmailInput {
            email: "ada@example.com".into(),
            masterclass_title: "Intro to Kafka".into(),
            scheduled_date: Some((now() + Duration::days(2)).to_rfc3339()),
            ..Default::default()
        })
        .await
        .expect("Expected registration email to be sent");
    assert!(res.success);
    assert!(!res.immediate_reminder_sent);
    assert_eq!(app.mailer.sent().len(), 1);
}

#[actix_web::main]
#[test]
async fn test_send_registration_email_with_invalid_date() {
    let (app, sdk) = spawn_app().await;

    let err = sdk
        .notification
        .send_registration_email(SendRegistrationEmailInput {
            email: "ada@example.com".into(),
            masterclass_title: "Intro to Kafka".into(),
            scheduled_date: Some("tomorrow-ish".into()),
            ..Default::default()
        })
        .await
        .expect_err("Expected registration email to be rejected");
    assert_eq!(err.variant, APIErrorVariant::BadClientData);
    assert!(app.mailer.sent().is_empty());
}
