//! Cookie-source strategies and their fixed attempt order

use crate::config::StrategyConfig;
use crate::error::{Error, Result};
use std::fmt;

/// Where an attempt takes its credentials from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Cookies extracted from a locally installed browser profile
    Browser(String),
    /// No credentials at all
    Anonymous,
}

/// One attempt configuration: a credential source plus auxiliary flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    credentials: CredentialSource,
    user_agent: Option<String>,
}

impl Strategy {
    /// Strategy that reads cookies from `browser`
    pub fn browser(browser: impl Into<String>) -> Self {
        Self {
            credentials: CredentialSource::Browser(browser.into()),
            user_agent: None,
        }
    }

    /// Credential-free strategy that only spoofs the user agent
    pub fn anonymous(user_agent: impl Into<String>) -> Self {
        Self {
            credentials: CredentialSource::Anonymous,
            user_agent: Some(user_agent.into()),
        }
    }

    /// Credential source of this strategy
    pub fn credentials(&self) -> &CredentialSource {
        &self.credentials
    }

    /// Whether this strategy depends on any credential source
    pub fn needs_credentials(&self) -> bool {
        !matches!(self.credentials, CredentialSource::Anonymous)
    }

    /// Short label for logs, e.g. `cookies:firefox` or `user-agent`
    pub fn label(&self) -> String {
        match &self.credentials {
            CredentialSource::Browser(browser) => format!("cookies:{}", browser),
            CredentialSource::Anonymous if self.user_agent.is_some() => "user-agent".into(),
            CredentialSource::Anonymous => "anonymous".into(),
        }
    }

    /// Command-line flags this strategy contributes
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let CredentialSource::Browser(browser) = &self.credentials {
            args.push("--cookies-from-browser".to_string());
            args.push(browser.clone());
        }
        if let Some(user_agent) = &self.user_agent {
            args.push("--user-agent".to_string());
            args.push(user_agent.clone());
        }
        args
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Ordered, immutable list of strategies tried for every request
///
/// The last entry never needs credentials, so a request is settled after at
/// most `len()` attempts.
#[derive(Debug, Clone)]
pub struct StrategyQueue {
    strategies: Vec<Strategy>,
}

impl StrategyQueue {
    /// Build a queue from an explicit list
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the list is empty or its last strategy
    /// depends on a credential source.
    pub fn new(strategies: Vec<Strategy>) -> Result<Self> {
        match strategies.last() {
            None => Err(Error::Config {
                message: "strategy list must not be empty".into(),
                key: Some("strategies".into()),
            }),
            Some(last) if last.needs_credentials() => Err(Error::Config {
                message: format!(
                    "last strategy '{}' must not depend on a credential source",
                    last
                ),
                key: Some("strategies".into()),
            }),
            Some(_) => Ok(Self { strategies }),
        }
    }

    /// One cookie strategy per configured browser, then the user-agent fallback
    pub fn from_config(config: &StrategyConfig) -> Self {
        let mut strategies: Vec<Strategy> = config
            .cookie_browsers
            .iter()
            .map(|browser| Strategy::browser(browser.as_str()))
            .collect();
        strategies.push(Strategy::anonymous(config.user_agent.as_str()));
        Self { strategies }
    }

    /// Strategies in attempt order
    pub fn iter(&self) -> std::slice::Iter<'_, Strategy> {
        self.strategies.iter()
    }

    /// Number of strategies, i.e. the worst-case attempt count
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Always false for a constructed queue
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl<'a> IntoIterator for &'a StrategyQueue {
    type Item = &'a Strategy;
    type IntoIter = std::slice::Iter<'a, Strategy>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
