use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Deployment variables read on top of the layered configuration
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const DATABASE_URL_ENV: &str = "CATALOG_DATABASE_URL";
pub const PORT_ENV: &str = "PORT";

#[derive(Debug, thiserror::Error)]
pub enum BotConfigError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Missing required setting '{key}' (set {env})")]
    MissingSecret {
        key: &'static str,
        env: &'static str,
    },

    #[error("Logging error: {0}")]
    Logging(String),
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BotConfig {
    pub server: ServerConfig,
    pub telegram: TelegramConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enabled: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,
    pub api_base: String,
    pub poll_interval_secs: u64,
    pub long_poll_timeout_secs: u64,
}

impl TelegramConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// HTTP timeout for Bot API calls; must outlast a long poll
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.long_poll_timeout_secs + 10)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogConfig {
    #[serde(default)]
    pub database_url: String,
    pub timeout_ms: u64,
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl BotConfig {
    /// Load from defaults, config files, `APPROACH_BOT__*` variables and the
    /// plain deployment variables, in increasing priority.
    ///
    /// Secrets are not checked here; call [`BotConfig::validate_for_serving`]
    /// or [`BotConfig::validate_for_import`] before use.
    pub fn load() -> Result<Self, BotConfigError> {
        let settings = Self::defaults()?;

        // Try to load from approach-bot.toml in current directory
        let settings = settings.add_source(File::with_name("approach-bot").required(false));

        // Try to load from ~/.config/approach-bot/config.toml
        let settings = match get_user_config_path() {
            Some(path) => settings.add_source(File::from(path).required(false)),
            None => settings,
        };

        let settings = settings.add_source(
            Environment::with_prefix("APPROACH_BOT")
                .separator("__")
                .try_parsing(true),
        );

        let settings = apply_deployment_env(settings, |key| std::env::var(key).ok())?;
        Self::from_builder(settings)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8443)?
            .set_default("server.enabled", true)?
            .set_default("telegram.api_base", "https://api.telegram.org")?
            .set_default("telegram.poll_interval_secs", 3)?
            .set_default("telegram.long_poll_timeout_secs", 30)?
            .set_default("catalog.timeout_ms", 5000)?
            .set_default("logging.level", "info")
    }

    pub fn from_builder(settings: ConfigBuilder<DefaultState>) -> Result<Self, BotConfigError> {
        Ok(settings.build()?.try_deserialize()?)
    }

    /// Serving needs both the bot token and the store connection string
    pub fn validate_for_serving(&self) -> Result<(), BotConfigError> {
        require(&self.telegram.token, "telegram.token", TOKEN_ENV)?;
        self.validate_for_import()
    }

    /// Importing only touches the store
    pub fn validate_for_import(&self) -> Result<(), BotConfigError> {
        require(&self.catalog.database_url, "catalog.database_url", DATABASE_URL_ENV)
    }
}

/// Apply `TELEGRAM_BOT_TOKEN`, `CATALOG_DATABASE_URL` and `PORT` overrides
pub fn apply_deployment_env<F>(
    settings: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    settings
        .set_override_option("telegram.token", lookup(TOKEN_ENV))?
        .set_override_option("catalog.database_url", lookup(DATABASE_URL_ENV))?
        .set_override_option("server.port", lookup(PORT_ENV))
}

fn require(value: &str, key: &'static str, env: &'static str) -> Result<(), BotConfigError> {
    if value.trim().is_empty() {
        return Err(BotConfigError::MissingSecret { key, env });
    }
    Ok(())
}

fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("approach-bot/config.toml"))
}
