use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use validator::Validate;

const DEFAULT_ENV: &str = "development";
const DEFAULT_LOG_LEVEL: &str = "info";
const CONFIG_DIR: &str = "config";
const DEFAULT_CURRENCY: &str = "INR";
const DEFAULT_TAX_RATE: f64 = 0.05;
const DEFAULT_ADVANCE_INTERVAL_SECS: u64 = 20;
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30;

/// Application configuration with validation.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Application environment.
    pub environment: String,

    /// Logging level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging).
    #[serde(default)]
    pub log_json: bool,

    /// ISO currency code used on receipts.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Tax rate itemized on exported receipts (fraction, not percent).
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Seconds of virtual time between delivery advances.
    #[validate(range(min = 1))]
    #[serde(default = "default_advance_interval")]
    pub delivery_advance_interval_secs: u64,

    /// Seconds of virtual time between refresh ticks.
    #[validate(range(min = 1))]
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

fn default_advance_interval() -> u64 {
    DEFAULT_ADVANCE_INTERVAL_SECS
}

fn default_refresh_interval() -> u64 {
    DEFAULT_REFRESH_INTERVAL_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENV.to_string(),
            log_level: default_log_level(),
            log_json: false,
            currency: default_currency(),
            tax_rate: default_tax_rate(),
            delivery_advance_interval_secs: default_advance_interval(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Loads configuration: built-in defaults, then optional
/// `config/default` and `config/<env>` files, then `APP__`-prefixed
/// environment variables.
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .set_default("environment", DEFAULT_ENV)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .set_default("currency", DEFAULT_CURRENCY)?
        .set_default("tax_rate", DEFAULT_TAX_RATE)?
        .set_default(
            "delivery_advance_interval_secs",
            DEFAULT_ADVANCE_INTERVAL_SECS,
        )?
        .set_default("refresh_interval_secs", DEFAULT_REFRESH_INTERVAL_SECS)?
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

/// Initializes the tracing subscriber. `RUST_LOG` overrides the
/// configured level when set.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!("greenledger={}", level);
    let filter = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt().with_env_filter(filter);
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
