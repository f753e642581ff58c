//! Parse and download operations
//!
//! [`VideoService`] owns everything a request needs: the tool invoker, the
//! classifier, and the strategy queue. It is built once at startup and
//! shared by all handlers, so concurrent requests never share mutable state.
//! Each download gets its own [`JobId`], which keeps output files apart.

use crate::config::Config;
use crate::error::{Error, ExtractError, Result};
use crate::extractor::{
    CliInvoker, Fallback, InvocationRequest, OutcomeClassifier, StderrMarkerClassifier,
    StrategyQueue, ToolInvoker, run_with_fallback,
};
use crate::media::{parse_info_output, resolve_artifact, shape_metadata};
use crate::types::{DownloadedArtifact, JobId, VideoMetadata};
use std::sync::Arc;
use url::Url;

/// Check that `url` is present and an absolute http(s) URL
///
/// Runs before any process is spawned.
///
/// # Errors
///
/// Returns [`Error::Validation`] describing the problem.
pub fn validate_url(url: Option<&str>) -> Result<Url> {
    let raw = url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| Error::Validation("URL is required".into()))?;

    let parsed = Url::parse(raw).map_err(|e| Error::Validation(format!("Invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(parsed),
        "http" | "https" => Err(Error::Validation("Invalid URL: missing host".into())),
        other => Err(Error::Validation(format!(
            "Invalid URL: unsupported scheme '{}'",
            other
        ))),
    }
}

/// Video parsing and downloading over the fallback loop
#[derive(Clone)]
pub struct VideoService {
    config: Arc<Config>,
    invoker: Arc<dyn ToolInvoker>,
    classifier: Arc<dyn OutcomeClassifier>,
    strategies: StrategyQueue,
}

impl std::fmt::Debug for VideoService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoService")
            .field("invoker", &self.invoker.name())
            .field("classifier", &self.classifier.name())
            .field("strategies", &self.strategies.len())
            .finish()
    }
}

impl VideoService {
    /// Service backed by the real `yt-dlp` binary
    pub fn new(config: Arc<Config>) -> Self {
        let invoker = CliInvoker::from_config(&config.tools);
        tracing::info!(
            binary = %invoker.binary_path().display(),
            timeout = ?config.tools.process_timeout,
            "Using yt-dlp"
        );
        let classifier = StderrMarkerClassifier::from_config(&config.strategies);
        Self::with_invoker(config, Arc::new(invoker), Arc::new(classifier))
    }

    /// Service with a custom invoker and classifier
    pub fn with_invoker(
        config: Arc<Config>,
        invoker: Arc<dyn ToolInvoker>,
        classifier: Arc<dyn OutcomeClassifier>,
    ) -> Self {
        let strategies = StrategyQueue::from_config(&config.strategies);
        Self {
            config,
            invoker,
            classifier,
            strategies,
        }
    }

    /// Replace the strategy queue
    pub fn with_strategies(mut self, strategies: StrategyQueue) -> Self {
        self.strategies = strategies;
        self
    }

    /// Strategies tried for every request, in order
    pub fn strategies(&self) -> &StrategyQueue {
        &self.strategies
    }

    /// Shared configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch and normalize metadata for `url`
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for a missing or malformed URL
    /// - [`ExtractError::AuthRequired`] if every strategy failed and the tool
    ///   asked for a signed-in session
    /// - [`ExtractError::InfoFailed`] for any other exhaustion
    /// - [`Error::ExternalTool`] if the tool cannot be started
    pub async fn parse(&self, url: Option<&str>) -> Result<VideoMetadata> {
        let url = validate_url(url)?;
        let request = InvocationRequest::dump_info(url.as_str());

        let outcome = run_with_fallback(
            self.invoker.as_ref(),
            self.classifier.as_ref(),
            &self.strategies,
            &request,
            |output| parse_info_output(&output.stdout),
        )
        .await?;

        match outcome {
            Fallback::Succeeded(done) => {
                let metadata = shape_metadata(done.value);
                tracing::info!(
                    url = %url,
                    strategy = %done.strategy,
                    formats = metadata.formats.len(),
                    "Parsed video info"
                );
                Ok(metadata)
            }
            Fallback::Exhausted(exhaustion) => {
                let attempts = exhaustion.attempts();
                let stderr = exhaustion.last_details();
                if exhaustion.auth_required() {
                    Err(ExtractError::AuthRequired { attempts, stderr }.into())
                } else {
                    Err(ExtractError::InfoFailed { attempts, stderr }.into())
                }
            }
        }
    }

    /// Download `url` into the configured directory
    ///
    /// `format` is passed to the tool verbatim; a missing or blank value
    /// falls back to the configured default.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] for a missing or malformed URL
    /// - [`ExtractError::DownloadFailed`] if every strategy failed, including
    ///   when the tool asked for a signed-in session
    /// - [`ExtractError::FileNotFound`] if the tool succeeded but left no file
    /// - [`Error::ExternalTool`] if the tool cannot be started
    pub async fn download(
        &self,
        url: Option<&str>,
        format: Option<&str>,
    ) -> Result<DownloadedArtifact> {
        let url = validate_url(url)?;
        let format = format
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(self.config.download.default_format.as_str());

        let job_id = JobId::new();
        let dir = self.config.download_dir();
        let template = dir.join(format!("{}.%(ext)s", job_id));
        let request = InvocationRequest::download(url.as_str(), format, template);

        tracing::info!(job_id = %job_id, url = %url, format, "Starting download");

        let outcome = run_with_fallback(
            self.invoker.as_ref(),
            self.classifier.as_ref(),
            &self.strategies,
            &request,
            |_| Ok(()),
        )
        .await?;

        if let Fallback::Exhausted(exhaustion) = outcome {
            return Err(ExtractError::DownloadFailed {
                attempts: exhaustion.attempts(),
                stderr: exhaustion.last_details(),
            }
            .into());
        }

        let artifact = resolve_artifact(dir, &job_id).await?;
        tracing::info!(
            job_id = %job_id,
            file = %artifact.file_name,
            "Download completed"
        );
        Ok(artifact)
    }
}
