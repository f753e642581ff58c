//! # clipgrab-api
//!
//! HTTP façade over the `yt-dlp` command-line tool for parsing and
//! downloading online videos.
//!
//! ## Design Philosophy
//!
//! - **Fallback first** - every request walks an ordered list of cookie
//!   sources and ends with a credential-free user-agent attempt
//! - **One verdict** - transient failures are logged and absorbed; callers
//!   only see the final outcome
//! - **Stateless** - nothing is shared between requests except read-only
//!   configuration and the output directory
//!
//! ## Quick Start
//!
//! ```no_run
//! use clipgrab_api::{Config, VideoService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(Config::default());
//!     let service = VideoService::new(config);
//!
//!     let metadata = service
//!         .parse(Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ"))
//!         .await?;
//!     println!("{} ({} formats)", metadata.title, metadata.formats.len());
//!
//!     let artifact = service.download(Some("https://vimeo.com/76979871"), None).await?;
//!     println!("saved as {}", artifact.public_path());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API server
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// External tool invocation and strategy fallback
pub mod extractor;
/// Tool output parsing, shaping, and artifact lookup
pub mod media;
/// Parse and download operations
pub mod service;
/// Core response types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ApiError, Error, ExtractError, Result, ToHttpStatus};
pub use extractor::{
    CliInvoker, OutcomeClassifier, StderrMarkerClassifier, Strategy, StrategyQueue, ToolInvoker,
};
pub use service::VideoService;
pub use types::{DownloadedArtifact, JobId, MediaType, VideoFormat, VideoMetadata};

use std::sync::Arc;

/// Prepare the output directory and serve the API until a termination signal
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use clipgrab_api::{Config, run_server};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_server(Config::from_env()?).await?;
///     Ok(())
/// }
/// ```
pub async fn run_server(config: Config) -> Result<()> {
    tokio::fs::create_dir_all(config.download_dir()).await?;
    tracing::info!(
        dir = %config.download_dir().display(),
        strategies = config.strategies.cookie_browsers.len() + 1,
        "Output directory ready"
    );

    let service = Arc::new(VideoService::new(Arc::new(config)));
    api::start_api_server(service).await
}

#[cfg(unix)]
pub(crate) async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
pub(crate) async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
