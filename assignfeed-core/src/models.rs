//! Canvas API records and the assignment type handed to the ICS emitter.
//!
//! API records keep every field optional: Canvas omits fields freely (e.g.
//! courses hidden by date restrictions only carry an id), and one odd record
//! should not make a whole page undecodable.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const UNNAMED_COURSE: &str = "Unnamed Course";

/// Opaque course identifier. Canvas sends integers; strings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseId {
    Number(u64),
    Text(String),
}

impl CourseId {
    fn is_blank(&self) -> bool {
        match self {
            CourseId::Number(n) => *n == 0,
            CourseId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseId::Number(n) => write!(f, "{n}"),
            CourseId::Text(s) => f.write_str(s),
        }
    }
}

/// A course as returned by `GET /api/v1/courses`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub id: Option<CourseId>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Course {
    /// The id, unless missing or blank (`0`, `""`).
    pub fn id(&self) -> Option<&CourseId> {
        self.id.as_ref().filter(|id| !id.is_blank())
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_COURSE)
    }
}

/// An assignment as returned by `GET /api/v1/courses/:id/assignments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiAssignment {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    /// Calendar-feed style identifier. The assignments endpoint does not
    /// populate it, but it takes part in the feed filter.
    #[serde(default, rename = "UID")]
    pub uid: Option<String>,
}

impl ApiAssignment {
    /// Whether the assignment is collected for the feed.
    ///
    /// True when `due_at` is non-empty or the `UID` field marks an assignment
    /// or quiz. `UID` is absent from real responses, so in practice this is
    /// "has a due date"; records kept only by the `UID` clause are dropped
    /// again by the emitter.
    pub fn is_feed_candidate(&self) -> bool {
        let has_due = self.due_at.as_deref().is_some_and(|d| !d.is_empty());
        let uid = self.uid.as_deref().unwrap_or_default();

        has_due || uid.contains("assignment") || uid.contains("quiz")
    }

    pub fn into_assignment(self, course_name: &str) -> Assignment {
        Assignment {
            name: self.name,
            due_at: self.due_at,
            html_url: self.html_url,
            course_name: course_name.to_string(),
        }
    }
}

/// An assignment tagged with the course it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub name: Option<String>,
    /// ISO-8601 due timestamp, as sent by the API.
    pub due_at: Option<String>,
    pub html_url: Option<String>,
    pub course_name: String,
}
