// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading for Bistro.
//!
//! # Loading Pipeline
//!
//! 1. Read the YAML/TOML/JSON file (or start from defaults when it is absent)
//! 2. Resolve `${VAR}` and `${VAR:default}` placeholders
//! 3. Apply environment variable overrides
//! 4. Validate
//!
//! # Environment Variable Override
//!
//! The deployment variables of the hosted service are honoured directly:
//!
//! ```text
//! PORT=5000
//! ACCESS_TOKEN_SECRET=...
//! DB_USER=...
//! DB_PASS=...
//! ```
//!
//! Any other setting can be overridden with the `BISTRO_` prefix:
//!
//! ```text
//! BISTRO_HOST=127.0.0.1
//! BISTRO_STORE_BACKEND=memory
//! BISTRO_LOG_LEVEL=debug
//! ```

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{BistroConfig, LogFormat, LogLevel, StoreBackend};

/// Prefix of the `BISTRO_*` override variables.
const ENV_PREFIX: &str = "BISTRO";

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader for Bistro.
///
/// # Examples
///
/// ```no_run
/// use bistro_config::ConfigLoader;
///
/// let config = ConfigLoader::new().load("bistro.yaml").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Whether to validate the loaded configuration.
    validate: bool,

    /// Fixed environment used instead of the process environment.
    env: Option<HashMap<String, String>>,
}

impl ConfigLoader {
    /// Creates a new configuration loader with default settings.
    pub fn new() -> Self {
        Self {
            validate: true,
            env: None,
        }
    }

    /// Enables or disables validation.
    ///
    /// Callers that adjust the configuration after loading should call
    /// [`BistroConfig::validate`] themselves.
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    /// Reads variables from `env` instead of the process environment.
    pub fn with_env<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(
            env.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Loads configuration from a file.
    ///
    /// The format is determined by the extension: `.yaml`/`.yml`, `.toml`
    /// or `.json`.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<BistroConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = self.read_file(path)?;
        let format = ConfigFormat::from_path(path)?;
        let config = self.parse_content(&content, format, path)?;

        self.finish(config)
    }

    /// Loads configuration from a file, or from defaults and the environment
    /// when the file does not exist.
    ///
    /// Reporting the missing file is left to the caller, which may not have
    /// logging set up yet.
    pub fn load_or_default(&self, path: impl AsRef<Path>) -> ConfigResult<BistroConfig> {
        let path = path.as_ref();
        if path.exists() {
            return self.load(path);
        }

        debug!(path = %path.display(), "Configuration file not found");
        self.finish(BistroConfig::default())
    }

    /// Loads configuration from a string.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<BistroConfig> {
        let content = self.resolve_env_placeholders(content);
        let config = parse_str(&content, format)?;

        self.finish(config)
    }

    fn finish(&self, mut config: BistroConfig) -> ConfigResult<BistroConfig> {
        self.apply_env_overrides(&mut config)?;

        if self.validate {
            config.validate()?;
        }

        debug!(
            port = config.server.port,
            backend = %config.store.backend,
            database = %config.store.database,
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    /// Reads file content.
    fn read_file(&self, path: &Path) -> ConfigResult<String> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))
    }

    /// Parses content based on format.
    fn parse_content(
        &self,
        content: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> ConfigResult<BistroConfig> {
        let content = self.resolve_env_placeholders(content);

        parse_str(&content, format).map_err(|e| match e {
            ConfigError::Serialization { message } => ConfigError::parse(path, message),
            other => other,
        })
    }

    fn var(&self, name: &str) -> Option<String> {
        match &self.env {
            Some(env) => env.get(name).cloned(),
            None => env::var(name).ok(),
        }
    }

    fn prefixed(&self, name: &str) -> String {
        format!("{}_{}", ENV_PREFIX, name)
    }

    /// Resolves `${VAR_NAME}` and `${VAR_NAME:default}` placeholders.
    ///
    /// Unknown variables without a default are kept verbatim.
    fn resolve_env_placeholders(&self, content: &str) -> String {
        let mut result = String::with_capacity(content.len());
        let mut chars = content.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '$' || chars.peek() != Some(&'{') {
                result.push(c);
                continue;
            }
            chars.next();

            let mut var_content = String::new();
            let mut found_close = false;
            for c in chars.by_ref() {
                if c == '}' {
                    found_close = true;
                    break;
                }
                var_content.push(c);
            }

            if !found_close {
                result.push_str("${");
                result.push_str(&var_content);
                continue;
            }

            let (var_name, default_value) = match var_content.split_once(':') {
                Some((name, default)) => (name, Some(default)),
                None => (var_content.as_str(), None),
            };

            match (self.var(var_name), default_value) {
                (Some(value), _) => result.push_str(&value),
                (None, Some(default)) => result.push_str(default),
                (None, None) => {
                    warn!("Environment variable '{}' not found", var_name);
                    result.push_str(&format!("${{{}}}", var_name));
                }
            }
        }

        result
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&self, config: &mut BistroConfig) -> ConfigResult<()> {
        // Hosting-platform variables
        if let Some(value) = self.var("PORT") {
            config.server.port = parse_port("PORT", &value)?;
        }
        if let Some(value) = self.var("ACCESS_TOKEN_SECRET") {
            config.auth.secret = value.into();
        }
        if let Some(value) = self.var("DB_USER") {
            config.store.db_user = Some(value);
        }
        if let Some(value) = self.var("DB_PASS") {
            config.store.db_pass = Some(value.into());
        }

        // Server
        let name = self.prefixed("HOST");
        if let Some(value) = self.var(&name) {
            config.server.host = value
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(&name, "expected an IP address"))?;
        }
        let name = self.prefixed("PORT");
        if let Some(value) = self.var(&name) {
            config.server.port = parse_port(&name, &value)?;
        }

        // Store
        let name = self.prefixed("STORE_BACKEND");
        if let Some(value) = self.var(&name) {
            config.store.backend = StoreBackend::parse(&value)
                .ok_or_else(|| ConfigError::invalid_env_var(&name, "expected memory or mongodb"))?;
        }
        if let Some(value) = self.var(&self.prefixed("STORE_URI")) {
            config.store.uri = Some(value.into());
        }
        if let Some(value) = self.var(&self.prefixed("DATABASE")) {
            config.store.database = value;
        }

        // Logging
        if let Some(level) = self
            .var(&self.prefixed("LOG_LEVEL"))
            .and_then(|v| LogLevel::parse(&v))
        {
            config.logging.level = level;
        }
        if let Some(format) = self
            .var(&self.prefixed("LOG_FORMAT"))
            .and_then(|v| LogFormat::parse(&v))
        {
            config.logging.format = format;
        }

        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("(no extension)")),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_str(content: &str, format: ConfigFormat) -> ConfigResult<BistroConfig> {
    match format {
        ConfigFormat::Yaml => parse_yaml(content),
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::serialization(e.to_string()))
        }
    }
}

/// YAML goes through the `config` crate.
fn parse_yaml<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .map_err(|e| ConfigError::serialization(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::serialization(e.to_string()))
}

fn parse_port(name: &str, value: &str) -> ConfigResult<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid_env_var(name, "expected valid port number"))
}

// =============================================================================
// Tests
// =============================================================================
