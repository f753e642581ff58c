//! CLI-based invoker using the external yt-dlp binary

use super::traits::{ExitStatus, ToolInvoker, ToolOutput};
use crate::config::{ToolsConfig, YTDLP_BINARY};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Invoker that runs yt-dlp as a child process
///
/// Each call spawns one process, waits for it, and captures stdout and
/// stderr in full. Children are spawned with `kill_on_drop`, so when the
/// request future is dropped (client disconnect, timeout) the process is
/// killed instead of being left running.
///
/// # Examples
///
/// ```no_run
/// use clipgrab_api::extractor::{CliInvoker, ToolInvoker};
/// use std::path::PathBuf;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let invoker = CliInvoker::new(PathBuf::from("/usr/local/bin/yt-dlp"));
/// let output = invoker.invoke(&["--version".to_string()]).await?;
/// println!("{}", output.stdout_text());
/// # Ok(())
/// # }
/// ```
pub struct CliInvoker {
    binary_path: PathBuf,
    timeout: Option<Duration>,
}

impl CliInvoker {
    /// Create a new invoker with an explicit binary path and no time limit
    pub fn new(binary_path: PathBuf) -> Self {
        Self {
            binary_path,
            timeout: None,
        }
    }

    /// Attempt to find yt-dlp in PATH
    pub fn from_path() -> Option<Self> {
        which::which(YTDLP_BINARY).ok().map(Self::new)
    }

    /// Build an invoker from the tools section of the configuration
    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self::new(tools.resolve_ytdlp()).with_timeout(tools.process_timeout)
    }

    /// Bound every invocation by `timeout` (None = wait indefinitely)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Binary this invoker executes
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}

#[async_trait]
impl ToolInvoker for CliInvoker {
    async fn invoke(&self, args: &[String]) -> crate::Result<ToolOutput> {
        let mut command = Command::new(&self.binary_path);
        command
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let run = command.output();
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, run).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        binary = %self.binary_path.display(),
                        timeout_secs = limit.as_secs(),
                        "Extraction tool timed out, process killed"
                    );
                    return Ok(ToolOutput {
                        status: ExitStatus::Failure,
                        exit_code: None,
                        stdout: Vec::new(),
                        stderr: format!("process timed out after {:?}", limit).into_bytes(),
                    });
                }
            },
            None => run.await,
        };

        let output = result.map_err(|e| {
            crate::Error::ExternalTool(format!(
                "Failed to execute {}: {}",
                self.binary_path.display(),
                e
            ))
        })?;

        Ok(ToolOutput {
            status: ExitStatus::from(output.status.success()),
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }
}
