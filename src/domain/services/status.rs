use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use crate::domain::models::event::{Event, EventStatus};
use crate::error::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Derives the lifecycle status of an event from its calendar dates.
///
/// Dates carry no timezone and are read as UTC midnight. Without an end date
/// the comparison switches from instants to calendar dates once the start has
/// been reached: the event stays `Ongoing` for the whole start day and is
/// `Ended` from the next calendar day on.
pub fn evaluate_status(date_start: &str, date_end: Option<&str>, now: DateTime<Utc>) -> EventStatus {
    let Some(start) = parse_date(date_start) else {
        return EventStatus::Unknown;
    };

    if now < start_of_day(start) {
        return EventStatus::Upcoming;
    }

    match date_end.filter(|raw| !raw.trim().is_empty()) {
        None => {
            if now.date_naive() > start {
                EventStatus::Ended
            } else {
                EventStatus::Ongoing
            }
        }
        Some(raw) => match parse_date(raw) {
            None => EventStatus::Unknown,
            Some(end) if now < start_of_day(end) => EventStatus::Ongoing,
            Some(_) => EventStatus::Ended,
        },
    }
}

pub fn status_of(event: &Event, now: DateTime<Utc>) -> EventStatus {
    evaluate_status(&event.date_start, event.date_end.as_deref(), now)
}

/// Write-time check: both dates must parse and the end may not precede the start.
pub fn validate_schedule(date_start: &str, date_end: Option<&str>) -> Result<(), AppError> {
    let start = parse_date(date_start)
        .ok_or_else(|| AppError::Validation("Invalid start date format".into()))?;

    if let Some(raw) = date_end {
        let end = parse_date(raw)
            .ok_or_else(|| AppError::Validation("Invalid end date format".into()))?;
        if end < start {
            return Err(AppError::Validation("End date cannot be before start date".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_unparsable_start_is_unknown() {
        assert_eq!(evaluate_status("01/02/2030", None, at(2030, 1, 1, 0)), EventStatus::Unknown);
        assert_eq!(evaluate_status("", Some("2030-01-05"), at(2030, 1, 1, 0)), EventStatus::Unknown);
    }

    #[test]
    fn test_before_start_is_upcoming() {
        assert_eq!(evaluate_status("2030-01-02", None, at(2030, 1, 1, 23)), EventStatus::Upcoming);
        assert_eq!(evaluate_status("2030-01-02", Some("not-a-date"), at(2030, 1, 1, 23)), EventStatus::Upcoming);
    }

    #[test]
    fn test_open_ended_event_uses_calendar_dates() {
        // Same calendar day as the start: ongoing until midnight
        assert_eq!(evaluate_status("2030-01-02", None, at(2030, 1, 2, 0)), EventStatus::Ongoing);
        assert_eq!(evaluate_status("2030-01-02", None, at(2030, 1, 2, 23)), EventStatus::Ongoing);
        assert_eq!(evaluate_status("2030-01-02", None, at(2030, 1, 3, 0)), EventStatus::Ended);

        assert_eq!(evaluate_status("2030-01-01", None, at(2030, 1, 1, 12)), EventStatus::Ongoing);
        assert_eq!(evaluate_status("2030-01-01", None, at(2030, 1, 2, 12)), EventStatus::Ended);
    }

    #[test]
    fn test_blank_end_date_counts_as_absent() {
        assert_eq!(evaluate_status("2030-01-01", Some("  "), at(2030, 1, 1, 12)), EventStatus::Ongoing);
    }

    #[test]
    fn test_bounded_event_compares_instants() {
        assert_eq!(evaluate_status("2030-01-01", Some("2030-01-05"), at(2030, 1, 3, 9)), EventStatus::Ongoing);
        assert_eq!(evaluate_status("2030-01-01", Some("2030-01-05"), at(2030, 1, 4, 23)), EventStatus::Ongoing);
        assert_eq!(evaluate_status("2030-01-01", Some("2030-01-05"), at(2030, 1, 5, 0)), EventStatus::Ended);
        assert_eq!(evaluate_status("2030-01-01", Some("2030-01-01"), at(2030, 1, 1, 8)), EventStatus::Ended);
    }

    #[test]
    fn test_unparsable_end_after_start_is_unknown() {
        assert_eq!(evaluate_status("2030-01-01", Some("2030-13-40"), at(2030, 1, 3, 0)), EventStatus::Unknown);
    }

    #[test]
    fn test_validate_schedule() {
        assert!(validate_schedule("2030-01-01", None).is_ok());
        assert!(validate_schedule("2030-01-01", Some("2030-01-01")).is_ok());
        assert!(matches!(validate_schedule("2030-02-01", Some("2030-01-01")), Err(AppError::Validation(_))));
        assert!(matches!(validate_schedule("tomorrow", None), Err(AppError::Validation(_))));
        assert!(matches!(validate_schedule("2030-01-01", Some("soon")), Err(AppError::Validation(_))));
    }
}
