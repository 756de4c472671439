//! Configuration settings structure
//!
//! Defines the main settings structure and loading logic for keysword.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::types::serde_helpers::{deserialize_secret, parse_flexible_bool};

/// Environment variable holding the JSS base URL
pub const ENV_HOST: &str = "JAMF_HOST";
/// Environment variable holding the service account username
pub const ENV_USERNAME: &str = "JAMF_USERNAME";
/// Environment variable holding the service account password
pub const ENV_PASSWORD: &str = "JAMF_PASSWORD";
/// Environment variable selecting the inventory page view
pub const ENV_CONSOLE_VIEW: &str = "JAMF_CONSOLE_VIEW";
/// Environment variable toggling the key identifier lookup
pub const ENV_REQUIRE_KEY_ID: &str = "JAMF_REQUIRE_KEY_ID";
/// Environment variable overriding the browser user agent
pub const ENV_USER_AGENT: &str = "JAMF_USER_AGENT";
/// Environment variable overriding the request timeout in seconds
pub const ENV_TIMEOUT: &str = "JAMF_TIMEOUT";

/// User agent the console expects on ajax calls
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/72.0.3626.81 Safari/537.36";

/// Main configuration settings for keysword
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Server and credentials
    pub jamf: JamfSettings,
    /// Web console behaviour
    pub console: ConsoleSettings,
    /// Logging configuration
    pub logging: LoggingSettings,
}

/// JSS connection settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct JamfSettings {
    /// Base URL of the JSS, e.g. `https://example.jamfcloud.com`
    pub host: String,
    /// Service account username
    pub username: String,
    /// Service account password
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,
}

/// Which `v=` view of `legacy/computers.html` carries the session token
/// and key marker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleView {
    #[default]
    Inventory,
    Management,
}

impl ConsoleView {
    /// Value of the `v` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Management => "management",
        }
    }
}

impl std::str::FromStr for ConsoleView {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "inventory" => Ok(Self::Inventory),
            "management" => Ok(Self::Management),
            other => Err(crate::Error::config(format!(
                "Invalid console view: {} (expected inventory or management)",
                other
            ))),
        }
    }
}

/// Web console request settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Inventory page view to scrape
    pub view: ConsoleView,
    /// Look up the FileVault key identifier before the ajax call
    pub require_key_id: bool,
    /// Browser user agent sent on every console request
    pub user_agent: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level
    pub level: String,
    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for JamfSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: String::new(),
            password: SecretString::from(String::new()),
        }
    }
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            view: ConsoleView::Inventory,
            require_key_id: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Create new settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Load settings from environment variables
    pub fn from_env() -> crate::Result<Self> {
        Self::default().merge_with_env()
    }

    /// Override fields with values from the process environment
    pub fn merge_with_env(self) -> crate::Result<Self> {
        self.merge_with(|key| std::env::var(key).ok())
    }

    /// Override fields with values from `lookup`, which maps an
    /// environment variable name to its value.
    pub fn merge_with<F>(mut self, lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.jamf.host = host;
        }

        if let Some(username) = lookup(ENV_USERNAME) {
            self.jamf.username = username;
        }

        if let Some(password) = lookup(ENV_PASSWORD) {
            self.jamf.password = SecretString::from(password);
        }

        if let Some(view) = lookup(ENV_CONSOLE_VIEW) {
            self.console.view = view.parse()?;
        }

        if let Some(flag) = lookup(ENV_REQUIRE_KEY_ID) {
            self.console.require_key_id = parse_flexible_bool(&flag).ok_or_else(|| {
                crate::Error::config(format!("Invalid {}: {}", ENV_REQUIRE_KEY_ID, flag))
            })?;
        }

        if let Some(user_agent) = lookup(ENV_USER_AGENT) {
            self.console.user_agent = user_agent;
        }

        if let Some(timeout) = lookup(ENV_TIMEOUT) {
            self.console.timeout_secs = timeout
                .parse()
                .map_err(|e| crate::Error::config(format!("Invalid timeout: {}", e)))?;
        }

        Ok(self)
    }

    /// Check that everything a retrieval needs is present
    pub fn validate(&self) -> crate::Result<()> {
        if self.jamf.host.trim().is_empty() {
            return Err(crate::Error::config(format!("{} is not set", ENV_HOST)));
        }
        if self.jamf.username.trim().is_empty() {
            return Err(crate::Error::config(format!("{} is not set", ENV_USERNAME)));
        }
        if self.jamf.password.expose_secret().is_empty() {
            return Err(crate::Error::config(format!("{} is not set", ENV_PASSWORD)));
        }
        if self.console.timeout_secs == 0 {
            return Err(crate::Error::config("timeout must be greater than zero"));
        }

        self.base_url().map(|_| ())
    }

    /// Parsed JSS base URL
    pub fn base_url(&self) -> crate::Result<Url> {
        let url = Url::parse(self.jamf.host.trim())
            .map_err(|e| crate::Error::config(format!("Invalid {}: {}", ENV_HOST, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(crate::Error::config(format!(
                "Invalid {}: unsupported scheme {}",
                ENV_HOST, scheme
            ))),
        }
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.console.timeout_secs)
    }
}
