// common/src/config.rs
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use config::{Config as ConfigFile, ConfigError, File, Environment};

use crate::auth::HeaderNames;

/// Central configuration for the web server and its signature gate
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub web_server_addr: String,

    // Header names carrying the wallet credentials
    pub auth: AuthConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub signature_header: String,
    pub message_header: String,
    pub public_key_header: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web_server_addr: "127.0.0.1:8081".to_string(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signature_header: "x-signature".to_string(),
            message_header: "x-message".to_string(),
            public_key_header: "x-public-key".to_string(),
        }
    }
}

impl AuthConfig {
    /// Normalized header names, rejecting empty, duplicate or non-token names
    pub fn header_names(&self) -> Result<HeaderNames, ConfigError> {
        let names = HeaderNames::new(
            &self.signature_header,
            &self.message_header,
            &self.public_key_header,
        );

        for name in names.iter() {
            if name.is_empty() {
                return Err(ConfigError::Message("auth header name must not be empty".into()));
            }
            if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
                return Err(ConfigError::Message(format!("invalid auth header name: {}", name)));
            }
        }

        if names.signature == names.message
            || names.signature == names.public_key
            || names.message == names.public_key
        {
            return Err(ConfigError::Message("auth header names must be distinct".into()));
        }

        Ok(names)
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        // Get the run mode, defaulting to "development"
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        // Locate the config directory
        let config_dir = env::var("CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Check if we're in the project root or a subcrate
                let mut path = PathBuf::from("./config");
                if !path.exists() {
                    path = PathBuf::from("../config");
                }
                path
            });

        Self::load_from(&config_dir, &run_mode)
    }

    /// Layer `default.toml`, `{run_mode}.toml`, `local.toml` and `APP__*`
    /// variables. Header names are not validated here; callers check them
    /// with [`AuthConfig::header_names`].
    pub fn load_from(config_dir: &Path, run_mode: &str) -> Result<Self, ConfigError> {
        tracing::info!("Loading configuration from {}", config_dir.display());
        tracing::info!("Using run mode: {}", run_mode);

        ConfigFile::builder()
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", run_mode))).required(false))
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Environment variables with prefix "APP", e.g. APP__AUTH__MESSAGE_HEADER
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Load from files, falling back to plain environment variables when a
    /// config source cannot be read or parsed. The values returned are not
    /// validated, so an invalid header name still fails at startup.
    pub fn from_env() -> Self {
        match Self::load() {
            Ok(config) => {
                tracing::info!("Configuration loaded from files and environment");
                config
            },
            Err(e) => {
                tracing::warn!("Failed to load configuration from files: {}", e);
                tracing::info!("Falling back to environment variables only");
                Self::from_plain_env()
            }
        }
    }

    fn from_plain_env() -> Self {
        let defaults = Self::default();

        let web_server_addr = env::var("WEB_SERVER_ADDR")
            .unwrap_or(defaults.web_server_addr);

        let auth = AuthConfig {
            signature_header: env::var("AUTH_SIGNATURE_HEADER")
                .unwrap_or(defaults.auth.signature_header),
            message_header: env::var("AUTH_MESSAGE_HEADER")
                .unwrap_or(defaults.auth.message_header),
            public_key_header: env::var("AUTH_PUBLIC_KEY_HEADER")
                .unwrap_or(defaults.auth.public_key_header),
        };

        Self {
            web_server_addr,
            auth,
        }
    }
}
