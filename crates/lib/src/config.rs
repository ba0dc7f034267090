//! # Application Configuration
//!
//! This module defines the configuration read from `config.toml` and the logic
//! for resolving the effective settings from the file, the environment and
//! command-line overrides. The result is a plain value built once at startup
//! and passed to every component that needs it.

use crate::constants::{
    API_KEY_ENV_VAR, DEFAULT_DISCOGS_API_URL, DEFAULT_OCR_COMMAND, DEFAULT_VISION_API_URL,
    DEFAULT_VISION_MODEL,
};
use crate::errors::ConfigError;
use crate::prompts::DEFAULT_SLEEVE_PROMPT;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// The root configuration structure, mapping directly to `config.toml`.
///
/// Every section and key is optional.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub discogs: DiscogsConfig,
    #[serde(default)]
    pub ocr: OcrConfig,
}

/// The `[api]` section: the vision language-model endpoint.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiConfig {
    pub key: Option<String>,
    pub model: Option<String>,
    pub prompt_template: Option<String>,
    pub url: Option<String>,
}

/// The `[discogs]` section: the marketplace lookup.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DiscogsConfig {
    pub token: Option<String>,
    pub url: Option<String>,
}

/// The `[ocr]` section: the local OCR command.
#[derive(Debug, Deserialize, Clone)]
pub struct OcrConfig {
    #[serde(default = "default_ocr_command")]
    pub command: String,
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            command: default_ocr_command(),
            language: None,
        }
    }
}

fn default_ocr_command() -> String {
    DEFAULT_OCR_COMMAND.to_string()
}

/// Values supplied by the caller that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub prompt_template: Option<String>,
}

/// The fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub prompt_template: String,
    pub discogs_token: Option<String>,
    pub discogs_url: String,
    pub ocr: OcrConfig,
}

/// Reads and parses a TOML configuration file.
///
/// A missing or malformed file is an error: there is no way to proceed without it.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    info!("Loading configuration from '{}'", path.display());
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<AppConfig, toml::de::Error> {
    toml::from_str(content)
}

impl AppConfig {
    /// Resolves the effective settings.
    ///
    /// The API key comes from the override, then `api.key`, then the
    /// `OPENAI_API_KEY` environment variable. Blank keys and tokens count as absent.
    /// Model and prompt template come from the override, then the file, then
    /// the built-in default.
    pub fn resolve(&self, overrides: &ConfigOverrides) -> Settings {
        let api_key = overrides
            .api_key
            .clone()
            .or_else(|| self.api.key.clone())
            .or_else(|| env::var(API_KEY_ENV_VAR).ok())
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            debug!("No API key configured; vision requests will be sent unauthenticated.");
        }

        Settings {
            api_key,
            api_url: self
                .api
                .url
                .clone()
                .unwrap_or_else(|| DEFAULT_VISION_API_URL.to_string()),
            model: overrides
                .model
                .clone()
                .or_else(|| self.api.model.clone())
                .unwrap_or_else(|| DEFAULT_VISION_MODEL.to_string()),
            prompt_template: overrides
                .prompt_template
                .clone()
                .or_else(|| self.api.prompt_template.clone())
                .unwrap_or_else(|| DEFAULT_SLEEVE_PROMPT.to_string()),
            discogs_token: self
                .discogs
                .token
                .clone()
                .filter(|token| !token.trim().is_empty()),
            discogs_url: self
                .discogs
                .url
                .clone()
                .unwrap_or_else(|| DEFAULT_DISCOGS_API_URL.to_string()),
            ocr: self.ocr.clone(),
        }
    }
}
