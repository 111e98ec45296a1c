//! ICS feed generation.
//!
//! Turns collected assignments into an RFC 5545 calendar document with one
//! `VEVENT` per assignment that has a due date.

mod event;
mod generate;

pub use event::{CalendarEvent, UNTITLED_ASSIGNMENT, event_uid, parse_due};
pub use generate::{PRODID, render, render_events};
