//! External extraction tool orchestration
//!
//! This module wraps the `yt-dlp` command-line tool behind a small
//! trait-based architecture and runs every request through an ordered list
//! of cookie-source strategies until one succeeds.
//!
//! ## Architecture
//!
//! - [`ToolInvoker`]: runs one invocation and captures its output
//!   ([`CliInvoker`] spawns the real binary)
//! - [`StrategyQueue`]: per-browser cookie strategies followed by a
//!   credential-free user-agent fallback
//! - [`OutcomeClassifier`]: decides success, retry, or the terminal verdict
//!   ([`StderrMarkerClassifier`] matches auth markers in stderr)
//! - [`run_with_fallback`]: the sequential loop tying them together
//!
//! ## Usage
//!
//! ```no_run
//! use clipgrab_api::config::StrategyConfig;
//! use clipgrab_api::extractor::{
//!     CliInvoker, InvocationRequest, StderrMarkerClassifier, StrategyQueue, run_with_fallback,
//! };
//!
//! # async fn example() -> clipgrab_api::Result<()> {
//! let invoker = CliInvoker::from_path().expect("yt-dlp not found in PATH");
//! let queue = StrategyQueue::from_config(&StrategyConfig::default());
//! let classifier = StderrMarkerClassifier::default();
//! let request = InvocationRequest::dump_info("https://vimeo.com/76979871");
//!
//! let outcome = run_with_fallback(&invoker, &classifier, &queue, &request, |out| {
//!     Ok(out.stdout.len())
//! })
//! .await?;
//! # Ok(())
//! # }
//! ```

mod classify;
mod cli;
mod fallback;
mod request;
mod strategy;
mod traits;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use classify::{Outcome, OutcomeClassifier, StderrMarkerClassifier};
pub use cli::CliInvoker;
pub use fallback::{
    AttemptFailure, Attempted, Exhaustion, Fallback, FailureReason, run_with_fallback,
};
pub use request::{InvocationRequest, Operation};
pub use strategy::{CredentialSource, Strategy, StrategyQueue};
pub use traits::{ExitStatus, ToolInvoker, ToolOutput};
