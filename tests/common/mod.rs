//! Common test utilities for clipgrab-api integration tests
//!
//! [`FakeYtDlp`] installs a small shell script that answers like `yt-dlp`
//! so the real process invoker can be exercised without network access.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use clipgrab_api::Config;

/// Info dump printed for `--dump-single-json`
pub const SAMPLE_INFO: &str = r#"{"title":"Big Buck Bunny","thumbnail":"https://i.example.com/bbb.jpg","duration":596.5,"uploader":"Blender Foundation","formats":[{"format_id":"sb0","url":"https://cdn.example.com/sb","vcodec":"none","acodec":"none","ext":"mhtml"},{"format_id":"140","url":"https://cdn.example.com/140","vcodec":"none","acodec":"mp4a.40.2","format_note":"medium","ext":"m4a","filesize":9650000},{"format_id":"22","url":"https://cdn.example.com/22","vcodec":"avc1.64001F","acodec":"mp4a.40.2","format_note":"720p","ext":"mp4","filesize_approx":150000000}]}"#;

/// Stderr yt-dlp prints when a site demands a signed-in session
pub const AUTH_STDERR: &str =
    "ERROR: [youtube] aqz-KE-bpKQ: Sign in to confirm you are not a bot. Use --cookies-from-browser or --cookies for the authentication.";

/// How the fake tool responds to each strategy
#[derive(Debug, Clone)]
pub struct Behavior {
    /// Browser whose cookie attempt succeeds, if any
    pub accept_browser: Option<String>,
    /// Whether the final user-agent attempt succeeds
    pub accept_anonymous: bool,
    /// Stderr printed by failing attempts
    pub failure_stderr: String,
    /// Seconds to sleep before answering
    pub sleep_secs: u32,
    /// Report success on download without writing a file
    pub skip_write: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            accept_browser: None,
            accept_anonymous: true,
            failure_stderr: "ERROR: could not find chrome cookies database".to_string(),
            sleep_secs: 0,
            skip_write: false,
        }
    }
}

/// A fake `yt-dlp` binary plus an output directory
pub struct FakeYtDlp {
    dir: TempDir,
    binary: PathBuf,
    log: PathBuf,
    pids: PathBuf,
    downloads: PathBuf,
}

impl FakeYtDlp {
    /// Write the script and make it executable
    pub fn install(behavior: Behavior) -> Self {
        let dir = TempDir::new().unwrap();
        let binary = dir.path().join("yt-dlp");
        let log = dir.path().join("calls.log");
        let pids = dir.path().join("pids.log");
        let info = dir.path().join("info.json");
        let downloads = dir.path().join("downloads");

        std::fs::create_dir_all(&downloads).unwrap();
        std::fs::write(&info, SAMPLE_INFO).unwrap();
        std::fs::write(&log, "").unwrap();
        std::fs::write(&pids, "").unwrap();

        let browser_case = match &behavior.accept_browser {
            Some(browser) => format!("  *\" --cookies-from-browser {} \"*) ok=1 ;;\n", browser),
            None => String::new(),
        };
        let write_step = if behavior.skip_write {
            ":"
        } else {
            "printf 'media' > \"$(printf '%s' \"$out\" | sed 's/%(ext)s/mp4/')\""
        };

        let script = format!(
            r#"#!/bin/sh
echo $$ >> '{pids}'
printf '%s\n' "$*" >> '{log}'
if [ {sleep} -gt 0 ]; then sleep {sleep}; fi
ok=0
case " $* " in
{browser_case}  *" --user-agent "*) ok={anon} ;;
esac
if [ "$ok" != 1 ]; then
  printf '%s\n' '{stderr}' >&2
  exit 1
fi
case " $* " in
  *" --dump-single-json "*)
    cat '{info}'
    ;;
  *)
    out=""
    prev=""
    for a in "$@"; do
      if [ "$prev" = "-o" ]; then out="$a"; fi
      prev="$a"
    done
    {write_step}
    ;;
esac
exit 0
"#,
            pids = pids.display(),
            log = log.display(),
            sleep = behavior.sleep_secs,
            browser_case = browser_case,
            anon = if behavior.accept_anonymous { 1 } else { 0 },
            stderr = behavior.failure_stderr,
            info = info.display(),
            write_step = write_step,
        );

        std::fs::write(&binary, script).unwrap();
        std::fs::set_permissions(&binary, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self {
            dir,
            binary,
            log,
            pids,
            downloads,
        }
    }

    /// Path of the fake binary
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Output directory for downloads
    pub fn downloads(&self) -> &Path {
        &self.downloads
    }

    /// Argument lines of every invocation so far
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Process ids of every invocation so far
    pub fn pids(&self) -> Vec<u32> {
        std::fs::read_to_string(&self.pids)
            .unwrap()
            .lines()
            .filter_map(|line| line.trim().parse().ok())
            .collect()
    }

    /// Configuration pointing at the fake binary and output directory
    pub fn config(&self, browsers: &[&str], timeout: Option<Duration>) -> Arc<Config> {
        let mut config = Config::default();
        config.tools.ytdlp_path = Some(self.binary.clone());
        config.tools.process_timeout = timeout;
        config.download.download_dir = self.downloads.clone();
        config.strategies.cookie_browsers = browsers.iter().map(|b| b.to_string()).collect();
        Arc::new(config)
    }
}

/// Whether `pid` is still running
///
/// Zombies count as gone: the process has exited and only awaits reaping.
#[cfg(target_os = "linux")]
pub fn process_alive(pid: u32) -> bool {
    match std::fs::read_to_string(format!("/proc/{}/stat", pid)) {
        Ok(stat) => stat
            .rsplit_once(')')
            .and_then(|(_, rest)| rest.split_whitespace().next())
            .is_some_and(|state| state != "Z" && state != "X"),
        Err(_) => false,
    }
}

/// Poll until `pid` is gone or `limit` elapses
#[cfg(target_os = "linux")]
pub async fn wait_for_exit(pid: u32, limit: Duration) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if !process_alive(pid) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    !process_alive(pid)
}
