//! Sequential fallback over the strategy queue
//!
//! Every strategy is tried exactly once, in queue order, and the loop stops
//! at the first attempt that both exits successfully and passes the
//! caller's output check. Failed attempts are logged and absorbed; only the
//! final verdict reaches the caller.
//!
//! # Example
//!
//! ```no_run
//! use clipgrab_api::config::StrategyConfig;
//! use clipgrab_api::extractor::{
//!     CliInvoker, Fallback, InvocationRequest, StderrMarkerClassifier, StrategyQueue,
//!     run_with_fallback,
//! };
//! use std::path::PathBuf;
//!
//! # async fn example() -> clipgrab_api::Result<()> {
//! let invoker = CliInvoker::new(PathBuf::from("yt-dlp"));
//! let classifier = StderrMarkerClassifier::default();
//! let queue = StrategyQueue::from_config(&StrategyConfig::default());
//! let request = InvocationRequest::dump_info("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
//!
//! match run_with_fallback(&invoker, &classifier, &queue, &request, |out| Ok(out.stdout_text())).await? {
//!     Fallback::Succeeded(done) => println!("{} bytes via {}", done.value.len(), done.strategy),
//!     Fallback::Exhausted(exhaustion) => println!("gave up: {}", exhaustion.last_details()),
//! }
//! # Ok(())
//! # }
//! ```

use super::classify::{Outcome, OutcomeClassifier};
use super::request::InvocationRequest;
use super::strategy::{Strategy, StrategyQueue};
use super::traits::{ToolInvoker, ToolOutput};

/// Longest stderr excerpt written to a single log line
const LOG_EXCERPT_CHARS: usize = 300;

/// Why an attempt did not count as a success
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The process exited non-zero, was killed, or timed out
    ExitStatus,
    /// The process exited zero but its output was rejected
    Rejected(String),
}

/// Record of one failed attempt
#[derive(Debug, Clone)]
pub struct AttemptFailure {
    /// Label of the strategy that was used
    pub strategy: String,
    /// 1-based position in the queue
    pub attempt: usize,
    /// Raw exit code, if any
    pub exit_code: Option<i32>,
    /// Captured stderr, trimmed
    pub stderr: String,
    /// Why the attempt failed
    pub reason: FailureReason,
}

/// A successful attempt and where in the queue it happened
#[derive(Debug, Clone)]
pub struct Attempted<T> {
    /// Value produced by the output check
    pub value: T,
    /// Strategy that succeeded
    pub strategy: Strategy,
    /// Number of invocations made, including the successful one
    pub attempts: usize,
}

/// All strategies failed
#[derive(Debug, Clone)]
pub struct Exhaustion {
    /// Terminal verdict from the classifier
    pub outcome: Outcome,
    /// Every failed attempt, in order
    pub failures: Vec<AttemptFailure>,
}

impl Exhaustion {
    /// Whether the classifier recognised an authentication challenge
    pub fn auth_required(&self) -> bool {
        self.outcome == Outcome::TerminalAuth
    }

    /// Number of attempts made
    pub fn attempts(&self) -> usize {
        self.failures.len()
    }

    /// Best diagnostic text for the caller
    ///
    /// The stderr of the last attempt, or its rejection reason when the
    /// tool exited cleanly with unusable output.
    pub fn last_details(&self) -> String {
        match self.failures.last() {
            Some(failure) if !failure.stderr.is_empty() => failure.stderr.clone(),
            Some(AttemptFailure {
                reason: FailureReason::Rejected(reason),
                ..
            }) => reason.clone(),
            Some(failure) => format!(
                "{} exited with code {}",
                failure.strategy,
                failure
                    .exit_code
                    .map_or_else(|| "none".to_string(), |code| code.to_string())
            ),
            None => String::new(),
        }
    }
}

/// Result of running the whole queue
#[derive(Debug)]
pub enum Fallback<T> {
    /// One strategy produced an accepted output
    Succeeded(Attempted<T>),
    /// Every strategy failed
    Exhausted(Exhaustion),
}

/// Run `request` with each strategy in `queue` until one is accepted
///
/// `accept` inspects the output of an attempt that exited successfully and
/// either produces the final value or rejects it with a reason, in which
/// case the next strategy is tried.
///
/// # Errors
///
/// Returns an error only when the invoker cannot start the tool at all;
/// another strategy cannot fix a missing binary.
pub async fn run_with_fallback<T, F>(
    invoker: &dyn ToolInvoker,
    classifier: &dyn OutcomeClassifier,
    queue: &StrategyQueue,
    request: &InvocationRequest,
    mut accept: F,
) -> crate::Result<Fallback<T>>
where
    F: FnMut(&ToolOutput) -> Result<T, String>,
{
    let mut failures: Vec<AttemptFailure> = Vec::with_capacity(queue.len());

    for (index, strategy) in queue.iter().enumerate() {
        let attempt = index + 1;
        let output = invoker.invoke(&request.args(strategy)).await?;

        let reason = match classifier.classify(&output) {
            Outcome::Success => match accept(&output) {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(
                            strategy = %strategy,
                            attempts = attempt,
                            "Extraction succeeded after fallback"
                        );
                    } else {
                        tracing::debug!(strategy = %strategy, "Extraction succeeded");
                    }
                    return Ok(Fallback::Succeeded(Attempted {
                        value,
                        strategy: strategy.clone(),
                        attempts: attempt,
                    }));
                }
                Err(reason) => FailureReason::Rejected(reason),
            },
            _ => FailureReason::ExitStatus,
        };

        let stderr = output.stderr_text();
        tracing::warn!(
            strategy = %strategy,
            attempt = attempt,
            max_attempts = queue.len(),
            exit_code = ?output.exit_code,
            reason = ?reason,
            stderr = %excerpt(&stderr),
            "Extraction attempt failed, trying next strategy"
        );

        failures.push(AttemptFailure {
            strategy: strategy.label(),
            attempt,
            exit_code: output.exit_code,
            stderr,
            reason,
        });
    }

    let stderrs: Vec<&str> = failures.iter().map(|f| f.stderr.as_str()).collect();
    let outcome = classifier.conclude(&stderrs);

    tracing::error!(
        url = request.url(),
        attempts = failures.len(),
        outcome = ?outcome,
        classifier = classifier.name(),
        "All extraction strategies failed"
    );

    Ok(Fallback::Exhausted(Exhaustion { outcome, failures }))
}

fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(LOG_EXCERPT_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
