//! Configuration for the MoodLens client.
//!
//! Read from `~/.moodlens/config.toml`. Every section is optional; missing
//! values fall back to the defaults below.
//!
//! ```toml
//! [app]
//! ascii_only = false
//! high_contrast = false
//! reduced_motion = false
//!
//! [api]
//! base_url = "http://localhost:3000"
//! timeout_seconds = 30
//! connect_timeout_seconds = 10
//!
//! [session]
//! path = "${HOME}/.moodlens/session.json"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use moodlens_types::UiOptions;

/// Scoring service used when neither config nor environment names one.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
/// Environment override for the scoring service base URL.
pub const API_URL_ENV: &str = "MOODLENS_API_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Default, Deserialize)]
pub struct MoodlensConfig {
    pub app: Option<AppConfig>,
    pub api: Option<ApiConfig>,
    pub session: Option<SessionConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Use ASCII-only glyphs for icons and the progress bar.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Show a static spinner instead of an animated one.
    #[serde(default)]
    pub reduced_motion: bool,
}

/// Scoring service connection settings.
#[derive(Debug, Default, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub connect_timeout_seconds: Option<u64>,
}

/// Location of the local session store.
#[derive(Debug, Default, Deserialize)]
pub struct SessionConfig {
    pub path: Option<String>,
}

/// Replace `${VAR}` references with environment values. Unset variables
/// become empty; an unterminated `${` is kept literally.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let var = &after[..end];
                if !var.is_empty() {
                    out.push_str(&env::var(var).unwrap_or_default());
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

impl MoodlensConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.app
            .as_ref()
            .map(|app| UiOptions {
                ascii_only: app.ascii_only,
                high_contrast: app.high_contrast,
                reduced_motion: app.reduced_motion,
            })
            .unwrap_or_default()
    }

    /// Base URL of the scoring service, with `MOODLENS_API_URL` taking precedence.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        self.resolve_base_url(env::var(API_URL_ENV).ok())
    }

    fn resolve_base_url(&self, env_override: Option<String>) -> String {
        env_override
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .or_else(|| {
                self.api
                    .as_ref()
                    .and_then(|api| api.base_url.as_deref())
                    .map(expand_env_vars)
                    .map(|raw| raw.trim().to_string())
                    .filter(|raw| !raw.is_empty())
            })
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .api
            .as_ref()
            .and_then(|api| api.timeout_seconds)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        let secs = self
            .api
            .as_ref()
            .and_then(|api| api.connect_timeout_seconds)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Session store location: `[session] path` if set, else `~/.moodlens/session.json`.
    #[must_use]
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session
            .as_ref()
            .and_then(|session| session.path.as_deref())
            .map(expand_env_vars)
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from)
            .or_else(default_session_path)
    }
}

/// `~/.moodlens`, the home of config, session store and logs.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".moodlens"))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

pub fn default_session_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("session.json"))
}
