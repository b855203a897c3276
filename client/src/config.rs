//! Client configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const SESSION_FILE_NAME: &str = "session.json";

fn default_session_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".config")
            .join("spv")
            .join(SESSION_FILE_NAME),
        None => PathBuf::from(".spv-session.json"),
    }
}

/// Configuration values controlling how the client reaches the platform.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SPV")]
pub struct ClientSettings {
    /// Base URL of the platform API.
    pub api_url: Option<String>,
    /// Path of the persisted session document.
    pub session_file: Option<PathBuf>,
    /// Request timeout applied to every gateway call, in seconds.
    pub timeout_seconds: Option<u64>,
}

impl ClientSettings {
    /// Return the configured API base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a valid URL.
    pub fn api_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(self.api_url.as_deref().unwrap_or(DEFAULT_API_URL))
    }

    /// Return the configured session file path, falling back to the default.
    pub fn session_file(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(default_session_file)
    }

    /// Return the request timeout applied to gateway calls.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}
