//! Configuration types for clipgrab-api

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

/// Name of the extraction binary searched for on `PATH`
pub const YTDLP_BINARY: &str = "yt-dlp";

/// Download behavior configuration
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Shared output directory for finished downloads (default: "./downloads")
    ///
    /// Files are named `<job id>.<ext>` and are never removed by this service.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Format selector used when a download request names none (default: "best")
    #[serde(default = "default_format")]
    pub default_format: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            default_format: default_format(),
        }
    }
}

/// External tool settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Whether to search PATH for yt-dlp if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Upper bound for a single invocation (default: 600 seconds, None = unbounded)
    ///
    /// An attempt that exceeds the limit is killed and counts as a failed
    /// attempt, so the next strategy still gets its turn.
    #[serde(
        default = "default_process_timeout",
        with = "optional_duration_serde"
    )]
    pub process_timeout: Option<Duration>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            search_path: true,
            process_timeout: default_process_timeout(),
        }
    }
}

impl ToolsConfig {
    /// Resolve the yt-dlp binary to execute
    ///
    /// An explicit `ytdlp_path` wins; otherwise PATH is searched with the
    /// `which` crate. When nothing is found the bare binary name is returned
    /// and the spawn failure surfaces on first use.
    pub fn resolve_ytdlp(&self) -> PathBuf {
        if let Some(path) = &self.ytdlp_path {
            return path.clone();
        }

        if self.search_path
            && let Ok(found) = which::which(YTDLP_BINARY)
        {
            return found;
        }

        tracing::warn!(
            binary = YTDLP_BINARY,
            "yt-dlp not found on PATH, relying on the bare binary name"
        );
        PathBuf::from(YTDLP_BINARY)
    }
}

/// Cookie-source strategies tried, in order, for every request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Browsers whose cookie stores are handed to `--cookies-from-browser`,
    /// most likely to succeed first (default: chrome, firefox, edge, brave)
    #[serde(default = "default_cookie_browsers")]
    pub cookie_browsers: Vec<String>,

    /// User agent sent by the final, credential-free strategy
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Case-sensitive stderr fragments that mark an authentication challenge
    #[serde(default = "default_auth_markers")]
    pub auth_markers: Vec<String>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            cookie_browsers: default_cookie_browsers(),
            user_agent: default_user_agent(),
            auth_markers: default_auth_markers(),
        }
    }
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_address")]
    pub bind_address: SocketAddr,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
        }
    }
}

/// Main configuration for the service
///
/// Built once at startup and shared read-only (behind `Arc`) by every
/// request handler.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Output directory and default format
    #[serde(flatten)]
    pub download: DownloadConfig,

    /// External tool location and limits
    #[serde(flatten)]
    pub tools: ToolsConfig,

    /// Cookie-source fallback strategies
    #[serde(default)]
    pub strategies: StrategyConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ApiConfig,
}

impl Config {
    /// Output directory for downloaded artifacts
    pub fn download_dir(&self) -> &PathBuf {
        &self.download.download_dir
    }

    /// Build a configuration from process environment variables
    ///
    /// Recognised variables: `HOST`, `PORT`, `FRONTEND_URL`, `DOWNLOAD_DIR`,
    /// `YTDLP_PATH`, `YTDLP_TIMEOUT_SECS`, `COOKIE_BROWSERS`,
    /// `YTDLP_USER_AGENT`, `YTDLP_AUTH_MARKERS`. Unset variables keep their
    /// defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    ///
    /// [`Config::from_env`] delegates here; tests pass a map instead of
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Config::default();

        let host = match get("HOST") {
            Some(value) => value.parse::<IpAddr>().map_err(|e| Error::Config {
                message: format!("invalid HOST '{}': {}", value, e),
                key: Some("HOST".into()),
            })?,
            None => config.server.bind_address.ip(),
        };
        let port = match get("PORT") {
            Some(value) => value.parse::<u16>().map_err(|e| Error::Config {
                message: format!("invalid PORT '{}': {}", value, e),
                key: Some("PORT".into()),
            })?,
            None => config.server.bind_address.port(),
        };
        config.server.bind_address = SocketAddr::new(host, port);

        if let Some(origin) = get("FRONTEND_URL") {
            config.server.cors_origins = vec![origin.trim_end_matches('/').to_string()];
        }

        if let Some(dir) = get("DOWNLOAD_DIR") {
            config.download.download_dir = PathBuf::from(dir);
        }

        if let Some(path) = get("YTDLP_PATH") {
            config.tools.ytdlp_path = Some(PathBuf::from(path));
        }

        if let Some(value) = get("YTDLP_TIMEOUT_SECS") {
            let secs = value.parse::<u64>().map_err(|e| Error::Config {
                message: format!("invalid YTDLP_TIMEOUT_SECS '{}': {}", value, e),
                key: Some("YTDLP_TIMEOUT_SECS".into()),
            })?;
            // 0 disables the limit
            config.tools.process_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(value) = get("COOKIE_BROWSERS") {
            config.strategies.cookie_browsers = split_list(&value, ',');
        }

        if let Some(user_agent) = get("YTDLP_USER_AGENT") {
            config.strategies.user_agent = user_agent;
        }

        // Markers are phrases and may contain commas
        if let Some(value) = get("YTDLP_AUTH_MARKERS") {
            config.strategies.auth_markers = split_list(&value, '|');
        }

        Ok(config)
    }
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

// Default value functions
fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_format() -> String {
    "best".into()
}

fn default_true() -> bool {
    true
}

fn default_process_timeout() -> Option<Duration> {
    Some(Duration::from_secs(600))
}

fn default_cookie_browsers() -> Vec<String> {
    vec![
        "chrome".into(),
        "firefox".into(),
        "edge".into(),
        "brave".into(),
    ]
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0.0.0 Safari/537.36"
        .into()
}

fn default_auth_markers() -> Vec<String> {
    vec!["Sign in to confirm".into(), "cookies".into()]
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

// Optional Duration serialization helper
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
