//! Argument lists for the two tool operations

use super::strategy::Strategy;
use std::path::PathBuf;

/// What the tool is asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Print the full info JSON for a single video, download nothing
    DumpInfo,
    /// Download `format` to `output_template`
    Download {
        /// yt-dlp format selector, e.g. "best" or "137+140"
        format: String,
        /// Output template, e.g. `downloads/<job>.%(ext)s`
        output_template: PathBuf,
    },
}

/// A URL plus the operation to run against it
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    url: String,
    operation: Operation,
}

impl InvocationRequest {
    /// Request the info dump for `url`
    pub fn dump_info(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            operation: Operation::DumpInfo,
        }
    }

    /// Request a download of `url` in `format` to `output_template`
    pub fn download(
        url: impl Into<String>,
        format: impl Into<String>,
        output_template: PathBuf,
    ) -> Self {
        Self {
            url: url.into(),
            operation: Operation::Download {
                format: format.into(),
                output_template,
            },
        }
    }

    /// Target URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Full argument list for one attempt with `strategy`
    ///
    /// Fixed operation flags come first, then the strategy's credential
    /// flags, then the URL behind `--` so it is never parsed as an option.
    pub fn args(&self, strategy: &Strategy) -> Vec<String> {
        let mut args: Vec<String> = match &self.operation {
            Operation::DumpInfo => vec![
                "--dump-single-json".into(),
                "--no-warnings".into(),
                "--no-playlist".into(),
            ],
            Operation::Download {
                format,
                output_template,
            } => vec![
                "-f".into(),
                format.clone(),
                "-o".into(),
                output_template.to_string_lossy().into_owned(),
                "--no-playlist".into(),
                "--no-warnings".into(),
                "--no-progress".into(),
            ],
        };
        args.extend(strategy.args());
        args.push("--".into());
        args.push(self.url.clone());
        args
    }
}
