//! Configuration file management for Parley.
//!
//! Settings are read from `~/.config/parley/config.toml`. Every field has a
//! default, so a missing file is not an error. The API key may also come
//! from the `GEMINI_API_KEY` (or `API_KEY`) environment variable, which takes
//! precedence over the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ParleyError, Result};

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Root configuration structure for config.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub session: SessionSettings,
}

/// Gemini API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiSettings {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
        }
    }
}

/// Per-session behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Upper bound for any single model call; elapsed calls take their fallback
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Whether to ask for persona do/don't tips when a scenario is selected
    #[serde(default = "default_true")]
    pub fetch_persona_tips: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            fetch_persona_tips: true,
        }
    }
}

impl SessionSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl ParleyConfig {
    /// Loads `~/.config/parley/config.toml`, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&default_config_path()?)
    }

    /// Loads the given file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: ParleyConfig = toml::from_str(&content)?;
        if config.session.request_timeout_secs == 0 {
            return Err(ParleyError::config(format!(
                "request_timeout_secs must be positive in {}",
                path.display()
            )));
        }
        Ok(config)
    }

    /// Returns the API key: environment first, then the config file.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        API_KEY_ENV_VARS
            .iter()
            .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
            .or_else(|| {
                self.gemini
                    .api_key
                    .clone()
                    .filter(|v| !v.trim().is_empty())
            })
            .ok_or_else(|| {
                ParleyError::config(
                    "Gemini API key not found: set GEMINI_API_KEY or [gemini].api_key in config.toml",
                )
            })
    }
}

/// Returns the path to the configuration file: ~/.config/parley/config.toml
pub fn default_config_path() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| ParleyError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("parley").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ParleyConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, ParleyConfig::default());
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.session.request_timeout(), Duration::from_secs(30));
        assert!(config.session.fetch_persona_tips);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "[gemini]\nmodel = \"gemini-2.5-flash\"\n\n[session]\nfetch_persona_tips = false\n",
        )
        .unwrap();

        let config = ParleyConfig::load_from(&path).unwrap();
        assert_eq!(config.gemini.model, "gemini-2.5-flash");
        assert_eq!(config.gemini.api_key, None);
        assert!(!config.session.fetch_persona_tips);
        assert_eq!(config.session.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[session]\nrequest_timeout_secs = 0\n").unwrap();
        assert!(ParleyConfig::load_from(&path).unwrap_err().is_config());
    }

    #[test]
    fn test_malformed_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[gemini\nmodel = 3").unwrap();
        assert!(matches!(
            ParleyConfig::load_from(&path),
            Err(ParleyError::Serialization { .. })
        ));
    }

    #[test]
    fn test_environment_key_wins_over_file() {
        let mut config = ParleyConfig::default();
        config.gemini.api_key = Some("from-file".to_string());

        let key = config
            .resolve_api_key_with(|name| (name == "API_KEY").then(|| "from-env".to_string()))
            .unwrap();
        assert_eq!(key, "from-env");

        let key = config.resolve_api_key_with(|_| None).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let config = ParleyConfig::default();
        assert!(config.resolve_api_key_with(|_| None).unwrap_err().is_config());
    }
}
