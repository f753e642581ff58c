//! OpenAPI documentation and schema generation
//!
//! Generated at compile time with utoipa from the handler annotations.

use utoipa::OpenApi;

/// OpenAPI documentation for the clipgrab-api REST API
///
/// Served as JSON at `/api/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "clipgrab-api REST API",
        version = "0.1.0",
        description = "Parse and download online videos through yt-dlp with cookie-source fallback",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Media
        crate::api::routes::parse_video,
        crate::api::routes::download_video,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::VideoMetadata,
        crate::types::VideoFormat,
        crate::types::MediaType,

        // API request/response types from routes
        crate::api::routes::ParseRequest,
        crate::api::routes::DownloadRequest,
        crate::api::routes::DownloadResponse,

        // Error types from error.rs
        crate::error::ApiError,
    )),
    tags(
        (name = "media", description = "Video parsing and downloading"),
        (name = "system", description = "System endpoints - Health checks, OpenAPI spec"),
    )
)]
pub struct ApiDoc;
