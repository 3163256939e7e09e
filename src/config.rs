// Runtime configuration: where submissions go and who is submitting.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/submit";
pub const DEFAULT_STUDENT_ID: &str = "131";

/// Settings handed to `SubmitClient`. Every field may be set from the
/// config file or overridden by a `BISKUT_*` environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Target URL of the multipart POST.
    pub endpoint: String,
    /// Value sent in the `studentId` form field.
    pub student_id: String,
    /// Treat the response as `text/event-stream` (`data:` framed lines).
    pub event_stream: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            student_id: DEFAULT_STUDENT_ID.to_string(),
            event_stream: false,
        }
    }
}

impl Config {
    /// Build the configuration from the config file (`BISKUT_CONFIG`, or
    /// `biskut/config.json` under the user's config directory) and then the
    /// `BISKUT_ENDPOINT`, `BISKUT_STUDENT_ID` and `BISKUT_EVENT_STREAM`
    /// environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match lookup("BISKUT_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.with_overrides(lookup)
    }

    /// Load a JSON config file. Keys missing from the file keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("BISKUT_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(student_id) = lookup("BISKUT_STUDENT_ID") {
            self.student_id = student_id;
        }
        if let Some(value) = lookup("BISKUT_EVENT_STREAM") {
            self.event_stream = value.trim().parse().map_err(|_| ConfigError::Env {
                var: "BISKUT_EVENT_STREAM",
                value,
            })?;
        }
        Ok(self)
    }
}

/// `<config dir>/biskut/config.json`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("biskut").join("config.json"))
}
