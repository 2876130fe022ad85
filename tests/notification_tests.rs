//! Notification, calendar and dashboard scenarios against the in-memory store

use chrono::{DateTime, Duration, TimeZone, Utc};
use commtrack::store::{MemoryStore, Store};
use commtrack::tracking::{
    self, companies, end_of_day, methods, start_of_day, CommunicationInput, CommunicationLog,
    CompanyInput, MethodInput,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 12, 15, 30, 0).unwrap()
}

async fn acme(store: &MemoryStore) -> String {
    companies::create_company(
        store,
        CompanyInput {
            name: Some("Acme".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .id
}

/// Insert a log directly, bypassing the no-backdating rule
async fn legacy_log(store: &MemoryStore, company_id: &str, date: DateTime<Utc>) -> CommunicationLog {
    let log = CommunicationLog::new(company_id, "Email", date, Some("imported".to_string()));
    store.insert_log(&log).await.unwrap();
    log
}

#[tokio::test]
async fn test_log_recorded_today_is_due_today() {
    let store = MemoryStore::new();
    let company_id = acme(&store).await;

    methods::create_method(
        &store,
        MethodInput {
            method_type: Some("Email".to_string()),
            description: Some("Send an email".to_string()),
            sequence: Some(3),
            mandatory: Some(true),
        },
    )
    .await
    .unwrap();

    let log = tracking::record_communication_at(
        &store,
        CommunicationInput {
            company_id: Some(company_id),
            communication_type: Some("Email".to_string()),
            communication_date: Some("2024-06-12T09:00:00Z".to_string()),
            notes: Some("intro".to_string()),
        },
        now(),
    )
    .await
    .unwrap();

    let notifications = tracking::compute_notifications(&store, now()).await.unwrap();
    assert_eq!(notifications.due_today, vec![log]);
    assert!(notifications.overdue.is_empty());
}

#[tokio::test]
async fn test_legacy_log_three_days_old_is_overdue() {
    let store = MemoryStore::new();
    let company_id = acme(&store).await;
    let log = legacy_log(&store, &company_id, now() - Duration::days(3)).await;

    let notifications = tracking::compute_notifications(&store, now()).await.unwrap();
    assert_eq!(notifications.overdue, vec![log]);
    assert!(notifications.due_today.is_empty());
}

#[tokio::test]
async fn test_notifications_partition_everything_up_to_end_of_day() {
    let store = MemoryStore::new();
    let company_id = acme(&store).await;

    let offsets_hours = [-200, -49, -16, -15, -1, 0, 5, 8, 9, 30, 400];
    for hours in offsets_hours {
        legacy_log(&store, &company_id, now() + Duration::hours(hours)).await;
    }

    let notifications = tracking::compute_notifications(&store, now()).await.unwrap();
    let again = tracking::compute_notifications(&store, now()).await.unwrap();
    assert_eq!(notifications, again);

    let mut union: Vec<_> = notifications
        .overdue
        .iter()
        .chain(notifications.due_today.iter())
        .map(|log| log.id.clone())
        .collect();
    union.sort();

    let mut expected: Vec<_> = store
        .list_logs()
        .await
        .unwrap()
        .into_iter()
        .filter(|log| log.communication_date <= end_of_day(now()))
        .map(|log| log.id)
        .collect();
    expected.sort();

    assert_eq!(union, expected);
    assert!(notifications
        .overdue
        .iter()
        .all(|log| log.communication_date < start_of_day(now())));
    assert!(notifications
        .due_today
        .iter()
        .all(|log| log.communication_date >= start_of_day(now())));
}

#[tokio::test]
async fn test_calendar_splits_at_current_instant() {
    let store = MemoryStore::new();
    let company_id = acme(&store).await;

    let earlier_today = legacy_log(&store, &company_id, now() - Duration::minutes(1)).await;
    let exactly_now = legacy_log(&store, &company_id, now()).await;
    let next_week = legacy_log(&store, &company_id, now() + Duration::days(7)).await;
    let last_month = legacy_log(&store, &company_id, now() - Duration::days(30)).await;

    let calendar = tracking::compute_calendar(&store, now()).await.unwrap();
    assert_eq!(calendar.past_communications, vec![last_month, earlier_today]);
    assert_eq!(calendar.future_communications, vec![exactly_now, next_week]);
}

#[tokio::test]
async fn test_dashboard_summaries() {
    let store = MemoryStore::new();
    let company_id = acme(&store).await;

    for days in 1..=8 {
        legacy_log(&store, &company_id, now() - Duration::days(days)).await;
    }
    let next = legacy_log(&store, &company_id, now() + Duration::days(2)).await;
    legacy_log(&store, &company_id, now() + Duration::days(10)).await;

    let dashboard = tracking::compute_dashboard(&store, now()).await.unwrap();
    assert_eq!(dashboard.len(), 1);

    let summary = &dashboard[0];
    assert_eq!(summary.company_name, "Acme");
    assert_eq!(summary.last_communications.len(), 5);
    assert_eq!(
        summary.last_communications[0].communication_date,
        now() - Duration::days(1)
    );
    assert!(summary
        .last_communications
        .iter()
        .all(|log| log.communication_date < now()));
    assert_eq!(summary.next_communication, Some(next));
}

#[tokio::test]
async fn test_deleted_company_leaves_orphan_logs() {
    let store = MemoryStore::new();
    let company_id = acme(&store).await;
    let orphan = legacy_log(&store, &company_id, now() + Duration::days(1)).await;

    companies::delete_company(&store, &company_id).await.unwrap();

    let dashboard = tracking::compute_dashboard(&store, now()).await.unwrap();
    assert!(dashboard.iter().all(|s| s.company_id != company_id));

    let calendar = tracking::compute_calendar(&store, now()).await.unwrap();
    assert_eq!(calendar.future_communications, vec![orphan]);

    // new logs cannot reference the deleted company
    let result = tracking::record_communication_at(
        &store,
        CommunicationInput {
            company_id: Some(company_id),
            communication_type: Some("Email".to_string()),
            communication_date: Some("2024-06-13".to_string()),
            notes: None,
        },
        now(),
    )
    .await;
    assert!(matches!(result, Err(commtrack::Error::NotFound(_))));
}
