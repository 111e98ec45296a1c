pub mod feed;

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use assignfeed_core::FeedError;

use crate::state::AppState;

/// Full application: routes, request tracing and CORS.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Every log line of a request carries its request_id.
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        tracing::info_span!(
            "request",
            request_id = %Uuid::new_v4(),
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .merge(feed::router())
        .with_state(state)
        .layer(trace)
        .layer(cors)
}

/// Body of every failed request.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// A pipeline failure that escaped `build_feed`. Always answered with a 500
/// and `{"error": "<message>"}`.
#[derive(Debug)]
pub struct AppError(FeedError);

impl From<FeedError> for AppError {
    fn from(err: FeedError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error = self.0.to_string();
        tracing::error!(%error, "Feed request failed");

        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error })).into_response()
    }
}
