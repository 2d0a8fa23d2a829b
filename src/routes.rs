use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::warn;

use crate::metrics;
use crate::state::AppState;

/// Fixed canary topic for the health check, deliberately distinct from any
/// application topic.
pub const HEALTH_TOPIC: &str = "support-test";

async fn root() -> &'static str {
    "Hello, Cloud Run!"
}

/// Live existence check against the canary topic on every call; nothing is
/// cached. Cancellation flows from the request future into the remote call.
async fn health(State(state): State<AppState>) -> Response {
    match state.pubsub().topic_exists(HEALTH_TOPIC).await {
        Ok(true) => {
            metrics::HEALTH_CHECKS.with_label_values(&["ok"]).inc();
            (
                StatusCode::OK,
                "PubSub connection is healthy. Topic exists.",
            )
                .into_response()
        }
        Ok(false) => {
            metrics::HEALTH_CHECKS.with_label_values(&["missing"]).inc();
            warn!(topic = HEALTH_TOPIC, "health topic does not exist");
            (StatusCode::NOT_FOUND, "Topic does not exist").into_response()
        }
        Err(err) => {
            metrics::HEALTH_CHECKS.with_label_values(&["error"]).inc();
            warn!(topic = HEALTH_TOPIC, error = %err, "health topic check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to check topic existence: {err}"),
            )
                .into_response()
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

async fn metrics_handler() -> impl IntoResponse {
    (
        [(axum::http::header::CONTENT_TYPE, "text/plain")],
        metrics::gather(),
    )
}
