// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::*;
use crate::config::AddressTable;
use crate::errors::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for the atelier.
///
/// Every section is optional; an empty file yields the built-in defaults,
/// which talk to the two hosted applications over HTTPS and to a local
/// Ollama instance.
///
/// # Fields
/// * `server` - Web form listener
/// * `language_model` - Prompt expansion backend
/// * `registry` - Remote application address table, retry policy and timeouts
/// * `pipeline` - Which applications the pipeline calls and where it writes
/// * `users` - Per-user submitted configuration, see [`crate::config::effective_user_config`]
///
/// # Example
/// ```yaml
/// server:
///   bind: 0.0.0.0:7860
/// language_model:
///   model: mistral
///   temperature: 0.7
/// registry:
///   max_attempts: 3
///   retry_delay_seconds: 2
/// pipeline:
///   user_id: super-user
///   output_dir: artifacts
///   database: memory.db
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub language_model: LanguageModelConfig,
    pub registry: RegistryConfig,
    pub pipeline: PipelineConfig,
    pub users: HashMap<String, UserConfig>,
}

/// Web form listener options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Ollama chat backend used to expand prompts.
///
/// # Fields
/// * `base_url` - Ollama server, `/api/chat` is appended
/// * `model` - Model name passed on every request
/// * `temperature` - Sampling temperature
/// * `timeout_seconds` - Per-request timeout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanguageModelConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub timeout_seconds: u64,
}

impl Default for LanguageModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl LanguageModelConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Registry options: where applications live and how hard to try reaching them.
///
/// # Fields
/// * `scheme` - `https` in production; `http` for local test servers
/// * `max_attempts` - Initialization attempts per application
/// * `retry_delay_seconds` - Fixed delay between attempts
/// * `metadata_timeout_seconds` - Timeout for manifest and schema fetches
/// * `execute_timeout_seconds` - Timeout for execute calls
/// * `nodes` - Address table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub scheme: String,
    pub max_attempts: u32,
    pub retry_delay_seconds: u64,
    pub metadata_timeout_seconds: u64,
    pub execute_timeout_seconds: u64,
    pub nodes: AddressTable,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_seconds: DEFAULT_RETRY_DELAY_SECS,
            metadata_timeout_seconds: DEFAULT_METADATA_TIMEOUT_SECS,
            execute_timeout_seconds: DEFAULT_EXECUTE_TIMEOUT_SECS,
            nodes: AddressTable::default(),
        }
    }
}

/// Pipeline wiring.
///
/// # Fields
/// * `text_to_image_app` - Application called with the expanded prompt
/// * `image_to_3d_app` - Application called with the generated image
/// * `user_id` - Identity sent as bearer credential and stored on memory records
/// * `output_dir` - Directory receiving `.png` and `.glb` artifacts
/// * `database` - SQLite file holding the `memories` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub text_to_image_app: String,
    pub image_to_3d_app: String,
    pub user_id: String,
    pub output_dir: PathBuf,
    pub database: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            text_to_image_app: TEXT_TO_IMAGE_APP_ID.to_string(),
            image_to_3d_app: IMAGE_TO_3D_APP_ID.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            database: PathBuf::from(DEFAULT_DATABASE),
        }
    }
}

impl PipelineConfig {
    /// The applications the pipeline calls, in call order
    pub fn app_ids(&self) -> Vec<String> {
        vec![self.text_to_image_app.clone(), self.image_to_3d_app.clone()]
    }
}

/// Configuration submitted for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserConfig {
    #[serde(default)]
    pub app_ids: Vec<String>,
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parse a config from YAML text. Empty text yields the defaults.
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

/// Load and validate a config from a YAML file
///
/// Every validation problem is reported, not just the first.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}
