//! Assignment → calendar event conversion.

use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;

use crate::error::{FeedError, FeedResult};
use crate::models::Assignment;

const UID_DOMAIN: &str = "canvas";

/// Summary for assignments that arrive without a name.
pub const UNTITLED_ASSIGNMENT: &str = "Untitled Assignment";

/// One `VEVENT`, already validated.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub uid: String,
    /// Used for both DTSTAMP and DTSTART.
    pub due: DateTime<Utc>,
    pub summary: String,
    pub description: String,
    /// Omitted from the event when Canvas sends no `html_url`.
    pub url: Option<String>,
}

impl CalendarEvent {
    /// `Ok(None)` for assignments without a due date; `Err` only when the
    /// due date cannot be parsed. A missing name or URL still yields an event.
    pub fn from_assignment(assignment: &Assignment) -> FeedResult<Option<Self>> {
        let Some(due_at) = assignment.due_at.as_deref().filter(|d| !d.is_empty()) else {
            return Ok(None);
        };

        let due = parse_due(due_at)?;

        let summary = assignment
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNTITLED_ASSIGNMENT.to_string());

        let url = assignment.html_url.clone().filter(|u| !u.is_empty());

        let uid = match &url {
            Some(url) => event_uid(url),
            None => event_uid(&format!(
                "{}/{}/{}",
                assignment.course_name,
                summary,
                due.format("%Y%m%dT%H%M%SZ")
            )),
        };

        Ok(Some(CalendarEvent {
            uid,
            due,
            summary,
            description: assignment.course_name.clone(),
            url,
        }))
    }
}

/// Parse an ISO-8601 due timestamp into UTC.
///
/// `Z` and `+00:00` are equivalent; other offsets are converted to UTC.
/// Timestamps without an offset are taken to be UTC already.
pub fn parse_due(value: &str) -> FeedResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FeedError::IcsGenerate(format!("invalid due date '{value}'")))
}

/// Stable event UID derived from the assignment URL (or, failing that, its
/// course, name and due time), so calendar clients see the same event across
/// refreshes.
pub fn event_uid(key: &str) -> String {
    let id = Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes());
    format!("{id}@{UID_DOMAIN}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn assignment(due_at: Option<&str>) -> Assignment {
        Assignment {
            name: Some("HW1".into()),
            due_at: due_at.map(str::to_string),
            html_url: Some("http://x/1".into()),
            course_name: "Math".into(),
        }
    }

    #[test]
    fn test_z_and_explicit_offset_are_equal() {
        let z = parse_due("2024-01-01T00:00:00Z").unwrap();
        let offset = parse_due("2024-01-01T00:00:00+00:00").unwrap();

        assert_eq!(z, offset);
        assert_eq!(z, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_non_utc_offset_converted() {
        let due = parse_due("2024-03-10T23:59:00-06:00").unwrap();
        assert_eq!(due, Utc.with_ymd_and_hms(2024, 3, 11, 5, 59, 0).unwrap());
    }

    #[test]
    fn test_offsetless_timestamp_is_utc() {
        let due = parse_due("2024-05-02T12:30:00").unwrap();
        assert_eq!(due, Utc.with_ymd_and_hms(2024, 5, 2, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_garbage_due_date_is_error() {
        assert!(matches!(parse_due("next tuesday"), Err(FeedError::IcsGenerate(_))));
    }

    #[test]
    fn test_uid_is_deterministic_per_url() {
        assert_eq!(event_uid("http://x/1"), event_uid("http://x/1"));
        assert_ne!(event_uid("http://x/1"), event_uid("http://x/2"));
        assert!(event_uid("http://x/1").ends_with("@canvas"));
    }

    #[test]
    fn test_no_due_date_is_not_an_event() {
        assert_eq!(CalendarEvent::from_assignment(&assignment(None)).unwrap(), None);
        assert_eq!(CalendarEvent::from_assignment(&assignment(Some(""))).unwrap(), None);
    }

    #[test]
    fn test_event_fields() {
        let event = CalendarEvent::from_assignment(&assignment(Some("2024-01-01T00:00:00Z")))
            .unwrap()
            .unwrap();

        assert_eq!(event.summary, "HW1");
        assert_eq!(event.description, "Math");
        assert_eq!(event.url.as_deref(), Some("http://x/1"));
        assert_eq!(event.uid, event_uid("http://x/1"));
    }

    #[test]
    fn test_missing_url_still_an_event() {
        let mut a = assignment(Some("2024-01-01T00:00:00Z"));
        a.html_url = None;

        let event = CalendarEvent::from_assignment(&a).unwrap().unwrap();
        assert_eq!(event.url, None);
        assert_eq!(event.uid, event_uid("Math/HW1/20240101T000000Z"));

        let again = CalendarEvent::from_assignment(&a).unwrap().unwrap();
        assert_eq!(event.uid, again.uid);
    }

    #[test]
    fn test_missing_name_uses_placeholder() {
        let mut a = assignment(Some("2024-01-01T00:00:00Z"));
        a.name = None;

        let event = CalendarEvent::from_assignment(&a).unwrap().unwrap();
        assert_eq!(event.summary, UNTITLED_ASSIGNMENT);
        assert_eq!(event.uid, event_uid("http://x/1"));
    }

    #[test]
    fn test_unparseable_due_date_is_error() {
        let a = assignment(Some("sometime"));
        assert!(CalendarEvent::from_assignment(&a).is_err());
    }
}
