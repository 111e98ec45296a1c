//! Core of assignfeed: pull assignments from a Canvas instance and render
//! them as an iCalendar feed.
//!
//! - `config` for the injected `FeedConfig`
//! - `fetch` / `pagination` for walking paginated API collections
//! - `ics` for calendar document generation
//! - `feed` for the courses → assignments → ICS pipeline

pub mod config;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod ics;
pub mod models;
pub mod pagination;

pub use config::FeedConfig;
pub use error::{FeedError, FeedResult};
pub use fetch::CanvasClient;
pub use models::{ApiAssignment, Assignment, Course, CourseId};
