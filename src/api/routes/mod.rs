//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`parse`]: video metadata lookup
//! - [`download`]: server-side downloads
//! - [`system`]: health and OpenAPI

use crate::error::Error;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};

mod download;
mod parse;
mod system;

pub use download::*;
pub use parse::*;
pub use system::*;

// ============================================================================
// Request/Response Types (shared across handlers)
// ============================================================================

/// Request body for POST /api/parse
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ParseRequest {
    /// Page URL of the video
    pub url: Option<String>,
}

/// Request body for POST /api/download
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct DownloadRequest {
    /// Page URL of the video
    pub url: Option<String>,
    /// yt-dlp format selector (default: "best")
    pub format: Option<String>,
}

/// Response for a completed POST /api/download
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    /// Always true; failures use the error body instead
    pub success: bool,
    /// Human-readable status
    pub message: String,
    /// Path of the artifact under the static `/downloads` mount
    pub download_url: String,
}

/// Turn an unreadable JSON body into a 400 instead of axum's default 415/422
pub(crate) fn invalid_body(rejection: JsonRejection) -> Error {
    Error::Validation(format!("Invalid request body: {}", rejection.body_text()))
}
