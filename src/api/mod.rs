//! REST API server module
//!
//! Exposes the parse and download operations over HTTP, serves finished
//! artifacts from the output directory, and publishes an OpenAPI document.

use crate::Result;
use crate::service::VideoService;
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Media
/// - `POST /api/parse` - Video metadata and format list
/// - `POST /api/download` - Download a video, returns its `/downloads` path
/// - `GET /downloads/<file>` - Static retrieval of finished downloads
///
/// ## System
/// - `GET /api/health` - Health check
/// - `GET /api/openapi.json` - OpenAPI specification
///
/// The static mount serves the same directory the service downloads into.
pub fn create_router(service: Arc<VideoService>) -> Router {
    let download_dir = service.config().download_dir().clone();
    let server = service.config().server.clone();
    let state = AppState::new(service);

    let router = Router::new()
        // Media
        .route("/api/parse", post(routes::parse_video))
        .route("/api/download", post(routes::download_video))
        // System
        .route("/api/health", get(routes::health_check))
        .route("/api/openapi.json", get(routes::openapi_spec))
        .with_state(state)
        // Finished artifacts
        .nest_service("/downloads", ServeDir::new(download_dir))
        .layer(TraceLayer::new_for_http());

    // Apply CORS middleware if enabled in config
    if server.cors_enabled {
        let cors = build_cors_layer(&server.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// `"*"` or an empty list allows any origin.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address
///
/// Runs until SIGTERM or SIGINT, then drains in-flight requests.
///
/// # Example
///
/// ```no_run
/// use clipgrab_api::{Config, VideoService};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::from_env()?);
/// let service = Arc::new(VideoService::new(config));
///
/// // Blocks until shutdown
/// clipgrab_api::api::start_api_server(service).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(service: Arc<VideoService>) -> Result<()> {
    let bind_address = service.config().server.bind_address;

    tracing::info!(address = %bind_address, "Starting API server");

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    serve(listener, service, crate::wait_for_signal()).await
}

/// Serve the API on an already bound listener until `shutdown` resolves
pub async fn serve<F>(
    listener: TcpListener,
    service: Arc<VideoService>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = listener.local_addr().map_err(crate::error::Error::Io)?;
    let app = create_router(service);

    tracing::info!(address = %address, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
