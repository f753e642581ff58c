//! Scripted tool invoker shared by unit tests

use super::traits::{ExitStatus, ToolInvoker, ToolOutput};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted reply
#[derive(Debug, Clone)]
pub(crate) enum Step {
    /// Return this output as-is
    Reply(ToolOutput),
    /// Write `<-o template with %(ext)s = ext>` to disk, then exit 0
    WriteArtifact(String),
    /// Fail to spawn
    Unavailable,
}

/// Successful exit printing `stdout`
pub(crate) fn ok(stdout: &str) -> Step {
    Step::Reply(ToolOutput {
        status: ExitStatus::Success,
        exit_code: Some(0),
        stdout: stdout.as_bytes().to_vec(),
        stderr: Vec::new(),
    })
}

/// Exit code 1 with `stderr`
pub(crate) fn fail(stderr: &str) -> Step {
    Step::Reply(ToolOutput {
        status: ExitStatus::Failure,
        exit_code: Some(1),
        stdout: Vec::new(),
        stderr: stderr.as_bytes().to_vec(),
    })
}

/// Successful download that produces a file with extension `ext`
pub(crate) fn writes(ext: &str) -> Step {
    Step::WriteArtifact(ext.to_string())
}

/// Invoker replaying a fixed script and recording every argument list
pub(crate) struct ScriptedInvoker {
    script: Mutex<VecDeque<Step>>,
    calls: AtomicUsize,
    args: Mutex<Vec<Vec<String>>>,
}

impl ScriptedInvoker {
    pub(crate) fn new(script: Vec<Step>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
            args: Mutex::new(Vec::new()),
        }
    }

    /// Invoker whose binary cannot be started
    pub(crate) fn unavailable() -> Self {
        Self::new(vec![Step::Unavailable])
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn recorded_args(&self) -> Vec<Vec<String>> {
        self.args.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ToolInvoker for ScriptedInvoker {
    async fn invoke(&self, args: &[String]) -> crate::Result<ToolOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.args.lock() {
            seen.push(args.to_vec());
        }

        let step = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front());

        match step {
            Some(Step::Reply(output)) => Ok(output),
            Some(Step::WriteArtifact(ext)) => {
                let template = args
                    .iter()
                    .position(|a| a == "-o")
                    .and_then(|i| args.get(i + 1))
                    .ok_or_else(|| crate::Error::ExternalTool("no -o argument".into()))?;
                std::fs::write(template.replace("%(ext)s", &ext), b"media")?;
                Ok(ToolOutput {
                    status: ExitStatus::Success,
                    exit_code: Some(0),
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                })
            }
            Some(Step::Unavailable) => Err(crate::Error::ExternalTool(
                "Failed to execute yt-dlp: No such file or directory".into(),
            )),
            None => Ok(ToolOutput {
                status: ExitStatus::Failure,
                exit_code: Some(1),
                stdout: Vec::new(),
                stderr: b"script exhausted".to_vec(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
