use std::sync::Arc;

use axum::body;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use tower::util::ServiceExt;

use mailroom::pubsub::{PubSub, StaticPubSub};
use mailroom::routes;
use mailroom::state::AppState;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn build_app(pubsub: Arc<dyn PubSub>) -> Router {
    routes::router(AppState::new(pubsub))
}

async fn get(app: Router, uri: &str) -> Result<(StatusCode, String), Box<dyn std::error::Error>> {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), 1024 * 64).await?;
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

#[tokio::test]
async fn root_greets_regardless_of_topic_state() -> TestResult {
    let clients: Vec<Arc<dyn PubSub>> = vec![
        Arc::new(StaticPubSub::healthy()),
        Arc::new(StaticPubSub::missing_topics()),
        Arc::new(StaticPubSub::unreachable()),
    ];
    for client in clients {
        let (status, body) = get(build_app(client), "/").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Hello, Cloud Run!");
    }
    Ok(())
}

#[tokio::test]
async fn health_reports_ok_when_topic_exists() -> TestResult {
    let app = build_app(Arc::new(StaticPubSub::healthy()));
    let (status, body) = get(app, "/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "PubSub connection is healthy. Topic exists.");
    Ok(())
}

#[tokio::test]
async fn health_is_not_found_when_topic_missing() -> TestResult {
    let app = build_app(Arc::new(StaticPubSub::missing_topics()));
    let (status, body) = get(app, "/health").await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Topic does not exist");
    Ok(())
}

#[tokio::test]
async fn health_surfaces_check_errors_as_500() -> TestResult {
    let app = build_app(Arc::new(StaticPubSub::unreachable()));
    let (status, body) = get(app, "/health").await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.starts_with("Failed to check topic existence:"));
    assert!(body.contains("simulated outage"));
    Ok(())
}

#[tokio::test]
async fn metrics_exposition_renders() -> TestResult {
    let app = build_app(Arc::new(StaticPubSub::healthy()));
    let (_, _) = get(app.clone(), "/health").await?;
    let (status, body) = get(app, "/metrics").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("mailroom_health_check_total"));
    Ok(())
}
