//! Overdue/due-today notifications, the calendar view and the per-company
//! dashboard.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::Store;

use super::logs::{end_of_day, start_of_day};
use super::models::CommunicationLog;

/// Number of past communications shown per company on the dashboard
pub const DASHBOARD_HISTORY: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notifications {
    /// Dated before the start of today
    pub overdue: Vec<CommunicationLog>,
    /// Dated within today, both ends inclusive
    pub due_today: Vec<CommunicationLog>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calendar {
    pub past_communications: Vec<CommunicationLog>,
    pub future_communications: Vec<CommunicationLog>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub company_id: String,
    pub company_name: String,
    /// Newest first
    pub last_communications: Vec<CommunicationLog>,
    pub next_communication: Option<CommunicationLog>,
}

/// Split logs into overdue and due-today relative to `now`'s day. Logs
/// after today are dropped.
pub fn partition_notifications(
    logs: impl IntoIterator<Item = CommunicationLog>,
    now: DateTime<Utc>,
) -> Notifications {
    let start = start_of_day(now);
    let end = end_of_day(now);

    let mut notifications = Notifications::default();
    for log in logs {
        if log.communication_date < start {
            notifications.overdue.push(log);
        } else if log.communication_date <= end {
            notifications.due_today.push(log);
        }
    }
    notifications
}

/// Split logs at the exact instant `now`, not at a day boundary. Input order
/// is preserved.
pub fn partition_calendar(
    logs: impl IntoIterator<Item = CommunicationLog>,
    now: DateTime<Utc>,
) -> Calendar {
    let (past, future) = logs
        .into_iter()
        .partition(|log| log.communication_date < now);

    Calendar {
        past_communications: past,
        future_communications: future,
    }
}

pub async fn compute_notifications(store: &dyn Store, now: DateTime<Utc>) -> Result<Notifications> {
    let logs = store.logs_until(end_of_day(now)).await?;
    Ok(partition_notifications(logs, now))
}

pub async fn compute_calendar(store: &dyn Store, now: DateTime<Utc>) -> Result<Calendar> {
    let logs = store.list_logs().await?;
    Ok(partition_calendar(logs, now))
}

/// One summary per stored company. This issues two log lookups per company.
pub async fn compute_dashboard(store: &dyn Store, now: DateTime<Utc>) -> Result<Vec<CompanySummary>> {
    let companies = store.list_companies().await?;

    let mut dashboard = Vec::with_capacity(companies.len());
    for company in companies {
        let last_communications = store
            .recent_logs(&company.id, now, DASHBOARD_HISTORY)
            .await?;
        let next_communication = store.next_log(&company.id, now).await?;

        dashboard.push(CompanySummary {
            company_id: company.id,
            company_name: company.name,
            last_communications,
            next_communication,
        });
    }

    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn log(date: DateTime<Utc>) -> CommunicationLog {
        CommunicationLog::new("acme", "Email", date, None)
    }

    #[test]
    fn test_partition_notifications() {
        let now = at(15, 12);
        let midnight = at(15, 0);
        let last_instant = end_of_day(now);
        let logs = vec![
            log(at(12, 9)),
            log(midnight - Duration::nanoseconds(1)),
            log(midnight),
            log(at(15, 18)),
            log(last_instant),
            log(last_instant + Duration::nanoseconds(1)),
        ];

        let result = partition_notifications(logs.clone(), now);
        assert_eq!(result.overdue, logs[0..2].to_vec());
        assert_eq!(result.due_today, logs[2..5].to_vec());
    }

    #[test]
    fn test_partition_is_idempotent() {
        let now = at(15, 12);
        let logs: Vec<_> = (10..20).map(|d| log(at(d, 8))).collect();
        assert_eq!(
            partition_notifications(logs.clone(), now),
            partition_notifications(logs, now)
        );
    }

    #[test]
    fn test_partition_calendar_uses_exact_instant() {
        let now = at(15, 12);
        let logs = vec![log(at(15, 11)), log(now), log(at(15, 13))];

        let calendar = partition_calendar(logs.clone(), now);
        assert_eq!(calendar.past_communications, logs[0..1].to_vec());
        assert_eq!(calendar.future_communications, logs[1..].to_vec());
    }

    #[test]
    fn test_notifications_serialize_camel_case() {
        let value = serde_json::to_value(Notifications::default()).unwrap();
        assert!(value.get("overdue").is_some());
        assert!(value.get("dueToday").is_some());
    }
}
