//! Calendar feed endpoints

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
};

use assignfeed_core::feed::build_feed;

use crate::routes::AppError;
use crate::state::AppState;

/// Payload bytes echoed into the log.
const PAYLOAD_LOG_LIMIT: usize = 2048;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assignments_feed).post(assignments_feed))
        .route("/assignments.ics", get(assignments_feed).post(assignments_feed))
        .route("/health", get(health))
}

/// GET|POST /assignments.ics - Build the feed from live Canvas data
///
/// Any request body is ignored apart from being logged.
async fn assignments_feed(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    if !body.is_empty() {
        let shown = &body[..body.len().min(PAYLOAD_LOG_LIMIT)];
        tracing::debug!(
            bytes = body.len(),
            payload = %String::from_utf8_lossy(shown),
            "Request payload"
        );
    }

    let ics = build_feed(&state.client, &state.config).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar"),
            (header::CONTENT_DISPOSITION, "inline; filename=assignments.ics"),
        ],
        ics,
    )
        .into_response())
}

/// GET /health
async fn health() -> &'static str {
    "ok"
}
