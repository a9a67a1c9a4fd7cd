//! Runtime configuration loaded via OrthoConfig.
//!
//! The application bundle never hard-codes the API origin: it arrives from
//! the environment (prefix `OPS360`), an optional config file, or the
//! command-line overrides, in that order of increasing precedence.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

fn default_session_file() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(".config/ops360/session.json"),
        None => PathBuf::from(".ops360-session.json"),
    }
}

/// Configuration values for the console process.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "OPS360")]
pub struct AppSettings {
    /// API origin, e.g. `https://ops.example.com/api/v1`.
    pub base_url: Option<String>,
    /// Override for the session file location.
    pub session_file: Option<PathBuf>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Program name handed to the loader in place of the real arguments; the
/// command tree owns those.
pub const SETTINGS_ARGV0: &str = "ops360";

/// Arguments for [`AppSettings::load_from_iter`] that leave the command
/// line untouched.
pub fn settings_args() -> [OsString; 1] {
    [OsString::from(SETTINGS_ARGV0)]
}

impl AppSettings {
    /// Apply command-line overrides on top of the loaded settings.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        session_file: Option<PathBuf>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        if base_url.is_some() {
            self.base_url = base_url;
        }
        if session_file.is_some() {
            self.session_file = session_file;
        }
        if timeout_seconds.is_some() {
            self.timeout_seconds = timeout_seconds;
        }
        self
    }

    /// Configured API origin, falling back to the local development server.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Configured session file, falling back to the per-user default.
    pub fn session_file(&self) -> PathBuf {
        self.session_file.clone().unwrap_or_else(default_session_file)
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }
}
