mod helpers;

use chrono::{Duration, Utc};
use helpers::setup::spawn_app;
use medi_reminder_sdk::{
    APIError, CreateReminderInput, MediReminderSDK, RecurrenceType, UpdateReminderInput,
};

fn is_status<T>(res: &Result<T, APIError>, status: u16) -> bool {
    matches!(res, Err(APIError::UnexpectedStatusCode(s)) if s.as_u16() == status)
}

fn daily_input(time: &str) -> CreateReminderInput {
    CreateReminderInput {
        medicine_name: "Vitamin D".into(),
        is_recurring: true,
        recurrence_type: Some(RecurrenceType::Daily),
        time: Some(time.into()),
        ..Default::default()
    }
}

#[actix_web::main]
#[test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    let health = sdk
        .status
        .check_health()
        .await
        .expect("Expected the service to be healthy");
    assert!(health.server_time > 0);
    assert!(!health.timezone.is_empty());
}

#[actix_web::main]
#[test]
async fn test_requires_valid_token() {
    let (_, sdk, address) = spawn_app().await;
    assert!(is_status(&sdk.reminder.get_mine().await, 401));

    let forged = MediReminderSDK::new(address, "not-a-token");
    assert!(is_status(&forged.notification.get_mine().await, 401));
}

#[actix_web::main]
#[test]
async fn test_overdue_reminder_fires_on_creation() {
    let (app, _, _) = spawn_app().await;
    let (user_id, sdk) = app.user_client();

    let scheduled_at = (Utc::now() - Duration::minutes(1)).timestamp_millis();
    let res = sdk
        .reminder
        .create(CreateReminderInput {
            medicine_name: "Aspirin".into(),
            scheduled_at: Some(scheduled_at),
            ..Default::default()
        })
        .await
        .expect("Expected to create reminder");
    let reminder_id = res.reminder.id.clone();
    assert!(res.reminder.sent);
    assert_eq!(res.reminder.user_id, user_id);
    assert!(res.next_occurrence.is_none());
    assert!(res.scheduling_warning.is_none());

    let notifications = sdk
        .notification
        .get_mine()
        .await
        .expect("Expected to get notifications")
        .notifications;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Medication Reminder");
    assert_eq!(notifications[0].message, "Time to take Aspirin");
    assert!(!notifications[0].read);

    let res = sdk
        .notification
        .mark_read(notifications[0].id.clone())
        .await
        .expect("Expected to mark notification as read");
    assert!(res.notification.read);

    // Sent one-off reminders can not be edited
    let res = sdk
        .reminder
        .update(UpdateReminderInput {
            reminder_id,
            scheduled_at: Some(scheduled_at + 1000 * 60 * 60),
            ..Default::default()
        })
        .await;
    assert!(is_status(&res, 400));
}

#[actix_web::main]
#[test]
async fn test_crud_recurring_reminder() {
    let (app, _, _) = spawn_app().await;
    let (_, sdk) = app.user_client();

    let created = sdk
        .reminder
        .create(daily_input("08:00"))
        .await
        .expect("Expected to create reminder");
    let reminder_id = created.reminder.id.clone();
    assert!(created.reminder.is_recurring);
    assert_eq!(created.reminder.time, Some("08:00".into()));
    let first_occurrence = created.next_occurrence.expect("Expected next occurrence");
    assert!(first_occurrence > Utc::now().timestamp_millis());

    let res = sdk
        .reminder
        .get(reminder_id.clone())
        .await
        .expect("Expected to get reminder");
    assert_eq!(res.reminder, created.reminder);
    assert_eq!(res.next_occurrence, Some(first_occurrence));

    let next = sdk
        .reminder
        .get_next()
        .await
        .expect("Expected to get next reminder")
        .next
        .expect("Expected an upcoming dose");
    assert_eq!(next.reminder.id, reminder_id);
    assert_eq!(next.next_occurrence, first_occurrence);

    let updated = sdk
        .reminder
        .update(UpdateReminderInput {
            reminder_id: reminder_id.clone(),
            time: Some("8:30".into()),
            ..Default::default()
        })
        .await
        .expect("Expected to update reminder");
    assert_eq!(updated.reminder.time, Some("08:30".into()));
    assert_eq!(updated.reminder.medicine_name, "Vitamin D");
    let next_occurrence = updated.next_occurrence.expect("Expected next occurrence");
    assert_eq!((next_occurrence - first_occurrence).rem_euclid(1000 * 60 * 60 * 24), 1000 * 60 * 30);

    // Other users can not see or cancel it
    let (_, other_sdk) = app.user_client();
    assert!(is_status(&other_sdk.reminder.get(reminder_id.clone()).await, 404));
    assert!(is_status(
        &other_sdk.reminder.delete(reminder_id.clone()).await,
        404
    ));
    assert!(other_sdk
        .reminder
        .get_mine()
        .await
        .expect("Expected to list reminders")
        .reminders
        .is_empty());

    let deleted = sdk
        .reminder
        .delete(reminder_id.clone())
        .await
        .expect("Expected to delete reminder");
    assert_eq!(deleted.reminder.id, reminder_id);
    assert!(is_status(&sdk.reminder.get(reminder_id.clone()).await, 404));
    assert!(is_status(&sdk.reminder.delete(reminder_id).await, 404));
}

#[actix_web::main]
#[test]
async fn test_lists_reminders_latest_first() {
    let (app, _, _) = spawn_app().await;
    let (_, sdk) = app.user_client();
    let in_days = |days: i64| (Utc::now() + Duration::days(days)).timestamp_millis();

    for scheduled_at in [in_days(1), in_days(3), in_days(2)] {
        sdk.reminder
            .create(CreateReminderInput {
                medicine_name: "Aspirin".into(),
                scheduled_at: Some(scheduled_at),
                ..Default::default()
            })
            .await
            .expect("Expected to create reminder");
    }
    sdk.reminder
        .create(daily_input("20:00"))
        .await
        .expect("Expected to create reminder");

    let reminders = sdk
        .reminder
        .get_mine()
        .await
        .expect("Expected to list reminders")
        .reminders;
    assert_eq!(reminders.len(), 4);
    assert!(reminders[0].scheduled_at > reminders[1].scheduled_at);
    assert!(reminders[1].scheduled_at > reminders[2].scheduled_at);
    assert!(reminders[3].is_recurring);
}

#[actix_web::main]
#[test]
async fn test_rejects_invalid_reminders() {
    let (app, _, _) = spawn_app().await;
    let (_, sdk) = app.user_client();

    let invalid = vec![
        CreateReminderInput {
            medicine_name: "Aspirin".into(),
            ..Default::default()
        },
        CreateReminderInput {
            medicine_name: "Aspirin".into(),
            is_recurring: true,
            recurrence_type: Some(RecurrenceType::Weekly),
            time: Some("08:00".into()),
            days_of_week: Some(vec![]),
            ..Default::default()
        },
        CreateReminderInput {
            medicine_name: "Aspirin".into(),
            is_recurring: true,
            recurrence_type: Some(RecurrenceType::EveryX),
            time: Some("08:00".into()),
            every_x_days: Some(0),
            ..Default::default()
        },
        CreateReminderInput {
            medicine_name: "Aspirin".into(),
            is_recurring: true,
            recurrence_type: Some(RecurrenceType::EveryX),
            time: Some("08:00".into()),
            every_x_days: Some(1_000_000_000_000),
            ..Default::default()
        },
        CreateReminderInput {
            time: None,
            ..daily_input("08:00")
        },
        daily_input("24:10"),
        CreateReminderInput {
            medicine_name: " ".into(),
            ..daily_input("08:00")
        },
    ];
    for input in invalid {
        assert!(is_status(&sdk.reminder.create(input).await, 400));
    }

    assert!(sdk
        .reminder
        .get_mine()
        .await
        .expect("Expected to list reminders")
        .reminders
        .is_empty());
}
