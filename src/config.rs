//! Configuration types for the mentor assistant.
//!
//! Loaded from a TOML file with full serde defaults: an empty file (or no
//! file at all) yields a working configuration, with only the LLM API key
//! expected from the environment.

use std::path::PathBuf;

use mentor_search::DiscoveryConfig;
use serde::{Deserialize, Serialize};

use crate::error::{MentorError, Result};

/// Top-level configuration for the assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorConfig {
    /// Language model provider settings.
    pub llm: LlmConfig,
    /// Resource discovery settings.
    pub discovery: DiscoveryConfig,
    /// Export and output settings.
    pub output: OutputConfig,
}

/// Language model provider configuration.
///
/// Points at any server implementing the OpenAI chat completions API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider base URL, with or without a trailing `/v1`.
    pub api_url: String,
    /// Model identifier sent in requests.
    pub api_model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Inline API key. Discouraged; prefer `api_key_env`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate per completion.
    pub max_tokens: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_owned(),
            api_model: "gpt-4o-mini".to_owned(),
            api_key_env: "OPENAI_API_KEY".to_owned(),
            api_key: None,
            temperature: 0.4,
            max_tokens: 2048,
        }
    }
}

impl LlmConfig {
    /// Resolve the API key: inline value first, then the environment.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the environment variable when no key
    /// can be found, so the user knows exactly what to set.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(ref key) = self.api_key {
            if !key.trim().is_empty() {
                return Ok(key.clone());
            }
        }
        match std::env::var(&self.api_key_env) {
            Ok(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(MentorError::Config(format!(
                "no API key configured: set {} or llm.api_key",
                self.api_key_env
            ))),
        }
    }
}

/// Export and output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where markdown exports are written.
    pub resources_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("resources"),
        }
    }
}

impl MentorConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| MentorError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| MentorError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/mentor/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("mentor").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("mentor")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/mentor-config/config.toml")
        }
    }
}
