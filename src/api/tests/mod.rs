use super::*;
use crate::Config;
use crate::extractor::StderrMarkerClassifier;
use crate::extractor::test_helpers::{ScriptedInvoker, Step};
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;


/// Router over a scripted invoker, an output dir, and the default strategy
/// list (chrome, firefox, edge, brave, then the user-agent fallback)
struct TestApp {
    router: Router,
    invoker: Arc<ScriptedInvoker>,
    service: Arc<VideoService>,
    _dir: TempDir,
}

fn test_app(script: Vec<Step>) -> TestApp {
    test_app_with(script, |_| {})
}

fn test_app_with(script: Vec<Step>, customize: impl FnOnce(&mut Config)) -> TestApp {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.download.download_dir = dir.path().to_path_buf();
    customize(&mut config);
    let config = Arc::new(config);

    let invoker = Arc::new(ScriptedInvoker::new(script));
    let service = Arc::new(VideoService::with_invoker(
        config.clone(),
        invoker.clone(),
        Arc::new(StderrMarkerClassifier::from_config(&config.strategies)),
    ));

    TestApp {
        router: create_router(service.clone()),
        invoker,
        service,
        _dir: dir,
    }
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_cors_enabled() {
    let app = test_app(vec![]);

    let request = Request::builder()
        .uri("/api/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();

    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_restricted_to_frontend_origin() {
    let app = test_app_with(vec![], |config| {
        config.server.cors_origins = vec!["http://localhost:5173".to_string()];
    });

    let allowed = Request::builder()
        .uri("/api/health")
        .header("Origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = send(&app.router, allowed).await;
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );

    let other = Request::builder()
        .uri("/api/health")
        .header("Origin", "http://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = send(&app.router, other).await;
    assert!(!response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_cors_disabled() {
    let app = test_app_with(vec![], |config| config.server.cors_enabled = false);

    let request = Request::builder()
        .uri("/api/health")
        .header("Origin", "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(!response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = test_app(vec![]);

    let request = Request::builder()
        .uri("/api/nope")
        .body(Body::empty())
        .unwrap();

    assert_eq!(send(&app.router, request).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_serve_stops_on_shutdown_signal() {
    let app = test_app(vec![]);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(serve(listener, app.service.clone(), async {
        rx.await.ok();
    }));

    tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop after the shutdown signal")
        .unwrap();
    assert!(result.is_ok());
}
