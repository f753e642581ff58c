//! Error types for clipgrab-api
//!
//! This module provides error handling for the service, including:
//! - Domain-specific error types for the extraction fallback loop
//! - HTTP status code mapping for API integration
//! - Flat JSON error bodies with a stable `error` field and raw tool
//!   diagnostics in `details`

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for clipgrab-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for clipgrab-api
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "PORT")
        key: Option<String>,
    },

    /// Request failed validation before any process was spawned
    #[error("{0}")]
    Validation(String),

    /// Every strategy was tried and none produced a usable result
    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// The external tool could not be started at all
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),
}

/// Terminal outcomes of the strategy fallback loop
#[derive(Debug, Error)]
pub enum ExtractError {
    /// All strategies failed and the tool asked for a signed-in session
    #[error("authentication required after {attempts} attempts")]
    AuthRequired {
        /// Number of strategies tried
        attempts: usize,
        /// Standard error of the last attempt
        stderr: String,
    },

    /// All strategies failed while fetching video information
    #[error("failed to fetch video info after {attempts} attempts")]
    InfoFailed {
        /// Number of strategies tried
        attempts: usize,
        /// Standard error of the last attempt
        stderr: String,
    },

    /// All strategies failed while downloading
    #[error("download failed after {attempts} attempts")]
    DownloadFailed {
        /// Number of strategies tried
        attempts: usize,
        /// Standard error of the last attempt
        stderr: String,
    },

    /// The tool reported success but no artifact carries the job id
    #[error("file not found after download (job {job_id})")]
    FileNotFound {
        /// Job identifier the output file should start with
        job_id: String,
    },
}

/// API error response body
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": "Authentication required",
///   "code": "auth_required",
///   "message": "This video requires a signed-in session...",
///   "details": "ERROR: [youtube] abc: Sign in to confirm you're not a bot"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Stable, human-readable error summary
    pub error: String,

    /// Machine-readable error code (e.g., "validation_error")
    pub code: String,

    /// Longer explanation, present for errors the user can act on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Diagnostic text, usually the raw stderr of the last tool attempt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Create a new API error with summary and code
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            message: None,
            details: None,
        }
    }

    /// Attach diagnostic details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Attach an explanatory message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - rejected before spawning anything
            Error::Validation(_) => 400,

            // 401 Unauthorized - the site wants a signed-in session
            Error::Extract(ExtractError::AuthRequired { .. }) => 401,

            // 500 Internal Server Error - everything else
            Error::Extract(ExtractError::InfoFailed { .. }) => 500,
            Error::Extract(ExtractError::DownloadFailed { .. }) => 500,
            Error::Extract(ExtractError::FileNotFound { .. }) => 500,
            Error::Config { .. } => 500,
            Error::ExternalTool(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Validation(_) => "validation_error",
            Error::Extract(e) => match e {
                ExtractError::AuthRequired { .. } => "auth_required",
                ExtractError::InfoFailed { .. } => "info_failed",
                ExtractError::DownloadFailed { .. } => "download_failed",
                ExtractError::FileNotFound { .. } => "file_not_found",
            },
            Error::ExternalTool(_) => "external_tool_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();

        match error {
            Error::Validation(message) => ApiError::new(message, code),
            Error::Extract(ExtractError::AuthRequired { stderr, .. }) => {
                ApiError::new("Authentication required", code)
                    .with_message(
                        "This video requires a signed-in session. Cookies from the configured \
                         browsers were unavailable or rejected.",
                    )
                    .with_details(stderr)
            }
            Error::Extract(ExtractError::InfoFailed { stderr, .. }) => {
                ApiError::new("Failed to fetch video info", code).with_details(stderr)
            }
            Error::Extract(ExtractError::DownloadFailed { stderr, .. }) => {
                ApiError::new("Download failed", code).with_details(stderr)
            }
            Error::Extract(ExtractError::FileNotFound { job_id }) => {
                ApiError::new("File not found after download", code)
                    .with_details(format!("no file starting with '{}' in the output directory", job_id))
            }
            Error::ExternalTool(message) => {
                ApiError::new("Extraction tool unavailable", code).with_details(message)
            }
            other => {
                ApiError::new("Internal server error", code).with_details(other.to_string())
            }
        }
    }
}
