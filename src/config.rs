use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::indicators::SamParams;
use crate::strategy::{SamStrategyConfig, SmaTrendConfig};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cyclebot";

/// Environment variable prefix, e.g. `CYCLEBOT__SAM__SMOOTH_LENGTH=14`
pub const ENV_PREFIX: &str = "CYCLEBOT";

/// Application configuration
///
/// Layered as: built-in defaults, then the config file, then environment
/// variables (nested keys separated by `__`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// tracing `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// SAM settings for the `demo` table
    pub sam: SamParams,
    /// SAM trend strategy; its `sam` settings also drive `sam` command readings
    pub strategy: SamStrategyConfig,
    pub sma_trend: SmaTrendConfig,
    /// Tickers to evaluate; empty means every ticker in the input
    pub tickers: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: "cyclebot=info".to_string(),
            sam: SamParams::default(),
            strategy: SamStrategyConfig::default(),
            sma_trend: SmaTrendConfig::default(),
            tickers: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, an optional file and the environment
    ///
    /// An explicit `path` must exist; the default `cyclebot.{toml,json,...}`
    /// is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config = Self::defaults_builder()?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("tickers"),
            )
            .build()
            .context("Failed to build configuration")?;

        Self::finish(config)
    }

    /// Parse a TOML document layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config = Self::defaults_builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .context("Failed to parse TOML configuration")?;

        Self::finish(config)
    }

    fn defaults_builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let defaults = Config::try_from(&AppConfig::default())
            .context("Failed to serialize default configuration")?;
        Ok(Config::builder().add_source(defaults))
    }

    fn finish(config: Config) -> Result<Self> {
        let app: AppConfig = config
            .try_deserialize()
            .context("Invalid configuration values")?;

        app.sam.validate().context("Invalid [sam] settings")?;
        app.strategy
            .sam
            .validate()
            .context("Invalid [strategy.sam] settings")?;

        tracing::debug!(?app, "Configuration loaded");
        Ok(app)
    }
}
