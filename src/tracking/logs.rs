//! Recording communications and the day-boundary helpers they share with
//! the notification engine. Days are UTC days.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{Error, Result};
use crate::store::Store;

use super::models::{CommunicationInput, CommunicationLog};

/// First instant of `now`'s day
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Last representable instant of `now`'s day
pub fn end_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    now.date_naive().and_time(last).and_utc()
}

/// Parse a communication date. Accepts RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS`
/// (taken as UTC) or a plain `YYYY-MM-DD` (UTC midnight).
pub fn parse_communication_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validate and store a communication log relative to the current time
pub async fn record_communication(
    store: &dyn Store,
    input: CommunicationInput,
) -> Result<CommunicationLog> {
    record_communication_at(store, input, Utc::now()).await
}

/// Validate and store a communication log as of `now`.
///
/// The company check and the insert are separate store calls; a company
/// deleted in between leaves an orphan log.
pub async fn record_communication_at(
    store: &dyn Store,
    input: CommunicationInput,
    now: DateTime<Utc>,
) -> Result<CommunicationLog> {
    let (Some(company_id), Some(communication_type), Some(raw_date)) = (
        present(input.company_id),
        present(input.communication_type),
        present(input.communication_date),
    ) else {
        return Err(Error::validation(
            "All fields (companyId, communicationType, communicationDate) are required.",
        ));
    };

    if store.get_company(&company_id).await?.is_none() {
        return Err(Error::not_found("Company not found."));
    }

    let date = parse_communication_date(&raw_date)
        .ok_or_else(|| Error::validation("Invalid communication date."))?;

    if date < start_of_day(now) {
        return Err(Error::validation(
            "Communication date cannot be in the past.",
        ));
    }

    let log = CommunicationLog::new(company_id, communication_type, date, input.notes);
    store.insert_log(&log).await?;

    tracing::info!(
        "Recorded {} communication for company {} on {}",
        log.communication_type,
        log.company_id,
        log.communication_date
    );
    Ok(log)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::tracking::Company;
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    fn input(company_id: &str, date: &str) -> CommunicationInput {
        CommunicationInput {
            company_id: Some(company_id.to_string()),
            communication_type: Some("Email".to_string()),
            communication_date: Some(date.to_string()),
            notes: None,
        }
    }

    async fn store_with_company() -> (MemoryStore, String) {
        let store = MemoryStore::new();
        let company = Company::new("Acme");
        store.insert_company(&company).await.unwrap();
        (store, company.id)
    }

    #[test]
    fn test_day_boundaries() {
        let now = noon();
        assert_eq!(
            start_of_day(now),
            Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap()
        );
        let end = end_of_day(now);
        assert!(end < Utc.with_ymd_and_hms(2024, 3, 16, 0, 0, 0).unwrap());
        assert!(end > Utc.with_ymd_and_hms(2024, 3, 15, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(
            parse_communication_date("2024-03-15"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_communication_date("2024-03-15T10:30:00Z"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_communication_date("2024-03-15T12:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_communication_date("2024-03-15T10:30:00"),
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap())
        );
        assert!(parse_communication_date("next tuesday").is_none());
        assert!(parse_communication_date("2024-02-30").is_none());
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let (store, company_id) = store_with_company().await;
        let mut req = input(&company_id, "2024-03-15");
        req.communication_type = None;
        let err = record_communication_at(&store, req, noon()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_company() {
        let (store, _) = store_with_company().await;
        let err = record_communication_at(&store, input("missing", "2024-03-15"), noon())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unparsable_date() {
        let (store, company_id) = store_with_company().await;
        let err = record_communication_at(&store, input(&company_id, "soon"), noon())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid communication date.");
    }

    #[tokio::test]
    async fn test_backdating_is_rejected() {
        let (store, company_id) = store_with_company().await;
        let err = record_communication_at(&store, input(&company_id, "2024-03-14T23:59:59Z"), noon())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Communication date cannot be in the past.");
        assert!(store.list_logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_earlier_today_and_future_are_accepted() {
        let (store, company_id) = store_with_company().await;

        let today = record_communication_at(&store, input(&company_id, "2024-03-15"), noon())
            .await
            .unwrap();
        assert!(today.communication_date < noon());

        let future = (noon() + Duration::days(30)).to_rfc3339();
        record_communication_at(&store, input(&company_id, &future), noon())
            .await
            .unwrap();

        assert_eq!(store.list_logs().await.unwrap().len(), 2);
    }
}
