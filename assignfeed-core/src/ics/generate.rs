//! Calendar document generation.

use icalendar::{Calendar, Component};

use crate::ics::event::CalendarEvent;
use crate::models::Assignment;

pub const PRODID: &str = "-//Canvas Assignment Feed//EN";

const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Render assignments as a calendar document.
///
/// Assignments without a due date are dropped. Assignments that cannot be
/// turned into an event are logged and skipped; the rest of the document is
/// still produced.
pub fn render(assignments: &[Assignment]) -> String {
    let events: Vec<CalendarEvent> = assignments
        .iter()
        .filter_map(|assignment| match CalendarEvent::from_assignment(assignment) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(
                    name = assignment.name.as_deref().unwrap_or("Unknown"),
                    course = %assignment.course_name,
                    error = %e,
                    "Skipping assignment in ICS output"
                );
                None
            }
        })
        .collect();

    tracing::info!(
        events = events.len(),
        assignments = assignments.len(),
        "Rendering calendar"
    );

    render_events(&events)
}

pub fn render_events(events: &[CalendarEvent]) -> String {
    let mut cal = Calendar::new();

    for event in events {
        cal.push(to_ics_event(event));
    }

    normalize_envelope(&cal.done().to_string())
}

fn to_ics_event(event: &CalendarEvent) -> icalendar::Event {
    let stamp = event.due.format(UTC_FORMAT).to_string();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid);
    ics_event.add_property("DTSTAMP", &stamp);
    ics_event.add_property("DTSTART", &stamp);
    ics_event.summary(&event.summary);
    ics_event.description(&event.description);
    if let Some(url) = &event.url {
        ics_event.add_property("URL", url);
    }

    ics_event.done()
}

/// Rewrite the calendar-level header written by the icalendar crate:
/// - VERSION and our PRODID directly after BEGIN:VCALENDAR
/// - CALSCALE:GREGORIAN dropped (it's the default)
fn normalize_envelope(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut depth = 0usize;

    for line in ics.lines() {
        if line.is_empty() {
            continue;
        }

        if line == "BEGIN:VCALENDAR" {
            result.push_str("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n");
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line.starts_with("BEGIN:") {
            depth += 1;
        } else if line.starts_with("END:") && line != "END:VCALENDAR" {
            depth = depth.saturating_sub(1);
        }

        // Calendar-level properties only; events never carry these.
        if depth == 0
            && (line.starts_with("VERSION:")
                || line.starts_with("PRODID:")
                || line.starts_with("CALSCALE:"))
        {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
