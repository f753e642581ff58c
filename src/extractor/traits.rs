//! Traits and types for running the external extraction tool

use async_trait::async_trait;

/// Exit status of an external command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The command exited successfully (exit code 0)
    Success,
    /// The command exited with a non-zero exit code, was killed, or timed out
    Failure,
}

impl ExitStatus {
    /// Returns `true` if the exit status represents success
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<bool> for ExitStatus {
    fn from(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Everything captured from one finished tool invocation
#[must_use]
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Whether the process exited successfully
    pub status: ExitStatus,
    /// Raw exit code, if the process exited normally
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: Vec<u8>,
    /// Captured standard error
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    /// Standard output decoded lossily as UTF-8
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// Standard error decoded lossily as UTF-8, trimmed
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Runs the external extraction tool with a complete argument list
///
/// The fallback loop only sees this trait, so it does not care whether the
/// tool is a real child process or a scripted stand-in.
#[async_trait]
pub trait ToolInvoker: Send + Sync {
    /// Run the tool once and wait for it to finish
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ExternalTool`] only when the process cannot be
    /// started at all. A process that starts and then fails is reported as a
    /// [`ToolOutput`] with [`ExitStatus::Failure`].
    async fn invoke(&self, args: &[String]) -> crate::Result<ToolOutput>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
