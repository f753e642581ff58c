//! Outcome classification for tool invocations
//!
//! The tool exposes no structured error signal, so authentication
//! challenges are recognised by substring matches on stderr. The heuristic
//! lives behind [`OutcomeClassifier`] so it can be replaced without touching
//! the fallback loop or result shaping.

use super::traits::ToolOutput;
use crate::config::StrategyConfig;

/// Decision for a single attempt, or for the request once all attempts failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The attempt succeeded; stop iterating
    Success,
    /// The attempt failed; move on to the next strategy
    Retry,
    /// All strategies failed and the site asked for a signed-in session
    TerminalAuth,
    /// All strategies failed for any other reason
    TerminalGeneric,
}

impl Outcome {
    /// Whether this outcome ends the request
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::TerminalAuth | Self::TerminalGeneric)
    }
}

/// Decides what a finished invocation means for the fallback loop
pub trait OutcomeClassifier: Send + Sync {
    /// Whether `stderr` reports an authentication challenge
    fn is_auth_challenge(&self, stderr: &str) -> bool;

    /// Classify one attempt from its exit status
    ///
    /// Output validation (JSON parsing, artifact lookup) happens after a
    /// `Success` verdict and can still turn the attempt into a retry.
    fn classify(&self, output: &ToolOutput) -> Outcome {
        if output.status.is_success() {
            Outcome::Success
        } else {
            Outcome::Retry
        }
    }

    /// Final verdict once the queue is exhausted
    ///
    /// `stderrs` holds the captured stderr of every failed attempt, in order.
    fn conclude(&self, stderrs: &[&str]) -> Outcome {
        if stderrs.iter().any(|stderr| self.is_auth_challenge(stderr)) {
            Outcome::TerminalAuth
        } else {
            Outcome::TerminalGeneric
        }
    }

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Classifier matching configured, case-sensitive stderr markers
#[derive(Debug, Clone)]
pub struct StderrMarkerClassifier {
    markers: Vec<String>,
}

impl StderrMarkerClassifier {
    /// Create a classifier for the given markers
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    /// Create a classifier from the strategy configuration
    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(config.auth_markers.clone())
    }
}

impl Default for StderrMarkerClassifier {
    fn default() -> Self {
        Self::from_config(&StrategyConfig::default())
    }
}

impl OutcomeClassifier for StderrMarkerClassifier {
    fn is_auth_challenge(&self, stderr: &str) -> bool {
        self.markers
            .iter()
            .any(|marker| !marker.is_empty() && stderr.contains(marker.as_str()))
    }

    fn name(&self) -> &'static str {
        "stderr-markers"
    }
}
