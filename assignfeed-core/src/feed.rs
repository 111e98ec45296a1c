//! Courses → assignments → ICS, as one linear pass.

use crate::config::FeedConfig;
use crate::error::FeedResult;
use crate::fetch::CanvasClient;
use crate::ics;
use crate::models::{ApiAssignment, Assignment, Course};

/// Every course matching the configured enrollment state.
pub async fn fetch_courses(client: &CanvasClient, config: &FeedConfig) -> FeedResult<Vec<Course>> {
    tracing::info!(enrollment_state = %config.enrollment_state, "Fetching courses");

    let courses: Vec<Course> = client.fetch_all(config.courses_url()?).await;

    tracing::info!(count = courses.len(), "Courses received");
    Ok(courses)
}

/// Feed candidates from every course, in course order, tagged with the
/// course name. Courses without an id are skipped.
pub async fn collect_assignments(
    client: &CanvasClient,
    config: &FeedConfig,
) -> FeedResult<Vec<Assignment>> {
    let courses = fetch_courses(client, config).await?;
    let mut collected = Vec::new();

    for course in &courses {
        let course_name = course.display_name();

        let Some(course_id) = course.id() else {
            tracing::warn!(course = course_name, "Skipping course without id");
            continue;
        };

        tracing::info!(course = course_name, %course_id, "Fetching assignments");

        let assignments: Vec<ApiAssignment> =
            client.fetch_all(config.assignments_url(course_id)?).await;

        tracing::info!(
            course = course_name,
            count = assignments.len(),
            "Assignments received"
        );

        if let Some(sample) = assignments.first() {
            tracing::debug!(course = course_name, ?sample, "Sample assignment");
        }

        collected.extend(
            assignments
                .into_iter()
                .filter(ApiAssignment::is_feed_candidate)
                .map(|a| a.into_assignment(course_name)),
        );
    }

    tracing::info!(total = collected.len(), "Assignments collected across all courses");
    Ok(collected)
}

/// Fetch everything and render the calendar document.
pub async fn build_feed(client: &CanvasClient, config: &FeedConfig) -> FeedResult<String> {
    let assignments = collect_assignments(client, config).await?;
    let ics = ics::render(&assignments);

    tracing::debug!(bytes = ics.len(), "ICS generation completed");
    Ok(ics)
}
