//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, ConfigError, Environment, File};
use esheep_core::{EsheepError, EsheepResult};
use std::path::Path;
use tracing::{debug, info, warn};

/// Directory used when `ESHEEP_CONFIG_DIR` is not set.
pub const DEFAULT_CONFIG_DIR: &str = "./config";

/// Layered configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    config_dir: String,
}

impl ConfigLoader {
    /// Loads configuration from `config_dir`.
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. `{config_dir}/default.toml`
    /// 2. `{config_dir}/{ESHEEP_ENVIRONMENT}.toml`
    /// 3. `{config_dir}/local.toml`
    /// 4. Environment variables such as `ESHEEP__CLIENT__PORT`
    pub fn new(config_dir: impl Into<String>) -> EsheepResult<Self> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self { config, config_dir })
    }

    /// Loads from `ESHEEP_CONFIG_DIR`, falling back to `./config`.
    pub fn from_default_location() -> EsheepResult<Self> {
        let dir = std::env::var("ESHEEP_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
        Self::new(dir)
    }

    /// Returns the loaded configuration.
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Reloads the configuration from disk and the environment.
    pub fn reload(&mut self) -> EsheepResult<()> {
        self.config = Self::load_config(&self.config_dir)?;
        info!("Configuration reloaded from {}", self.config_dir);
        Ok(())
    }

    fn load_config(config_dir: &str) -> EsheepResult<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var("ESHEEP_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ESHEEP")
                .prefix_separator("__")
                .separator("__"),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(|c| c.try_deserialize::<AppConfig>())
            .map_err(config_error_to_esheep_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Checks the values the facade cannot work without.
pub fn validate_config(config: &AppConfig) -> EsheepResult<()> {
    let client = &config.client;

    if client.host.trim().is_empty() {
        return Err(EsheepError::configuration("client.host is required"));
    }

    if client.port == 0 {
        return Err(EsheepError::configuration("client.port must be non-zero"));
    }

    if client.connect_timeout_ms == 0 {
        return Err(EsheepError::configuration(
            "client.connect_timeout_ms must be non-zero",
        ));
    }

    // The service decides whether a credential is acceptable.
    if client.api_token.is_empty() {
        warn!("client.api_token is empty; requests will carry an empty credential");
    }

    Ok(())
}

fn config_error_to_esheep_error(err: ConfigError) -> EsheepError {
    EsheepError::Configuration(err.to_string())
}
