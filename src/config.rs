use crate::domain::{FilterPolicy, ScoringVariant, Sport, SpreadStrategy};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub odds: OddsConfig,
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub payment: PaymentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Frontend origin, used to build checkout redirect URLs
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Shared secret guarding the cron-only refresh endpoint
    #[serde(default)]
    pub cron_secret: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_frontend_url() -> String {
    "http://localhost:3000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct OddsConfig {
    /// The Odds API key
    #[serde(default)]
    pub api_key: String,
    /// Bookmaker region passed to the provider
    #[serde(default = "default_region")]
    pub region: String,
    /// Seconds a fetched odds snapshot stays fresh
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// How far ahead upcoming games are retained, in hours
    #[serde(default = "default_horizon_hours")]
    pub horizon_hours: i64,
    /// daysFrom window for the scores endpoint
    #[serde(default = "default_scores_days_from")]
    pub scores_days_from: u8,
    /// Which fetched games are retained for scoring
    #[serde(default)]
    pub filter: FilterPolicy,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Sport served when a request does not name one
    #[serde(default = "default_sport")]
    pub default_sport: Sport,
}

fn default_region() -> String {
    "us".to_string()
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_horizon_hours() -> i64 {
    168
}

fn default_scores_days_from() -> u8 {
    3
}

fn default_request_timeout() -> u64 {
    10
}

fn default_sport() -> Sport {
    Sport::NFL
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub variant: ScoringVariant,
    #[serde(default)]
    pub spread_strategy: SpreadStrategy,
    /// Points the spread lock must sit below its moneyline confidence
    #[serde(default = "default_spread_cap_margin")]
    pub spread_cap_margin: u8,
}

fn default_spread_cap_margin() -> u8 {
    5
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            variant: ScoringVariant::default(),
            spread_strategy: SpreadStrategy::default(),
            spread_cap_margin: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the JSON state files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for session tokens
    #[serde(default)]
    pub token_secret: String,
    /// Token lifetime in hours
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
}

fn default_token_ttl_hours() -> i64 {
    72
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret key; checkout is disabled when empty
    #[serde(default)]
    pub secret_key: String,
    /// Stripe price id for the subscription line item
    #[serde(default)]
    pub price_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Base log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// EnvFilter directives used when RUST_LOG is absent: the configured
    /// level for dependencies, this crate at debug.
    pub fn filter_directives(&self) -> String {
        let level = self.level.trim();
        let level = if level.is_empty() { "info" } else { level };
        format!("{level},lockbox=debug")
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("server.port", 8080)?
            .set_default("odds.cache_ttl_secs", 300)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("LOCKBOX_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (LOCKBOX__ODDS__API_KEY, etc.)
            .add_source(
                Environment::with_prefix("LOCKBOX")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;
        config.apply_legacy_env();
        Ok(config)
    }

    /// Unprefixed variable names kept for deployment compatibility.
    /// These win over file values but lose to LOCKBOX_* overrides only
    /// when the prefixed form is absent.
    fn apply_legacy_env(&mut self) {
        if let Ok(key) = std::env::var("THE_ODDS_API_KEY") {
            if !key.is_empty() {
                self.odds.api_key = key;
            }
        }
        if let Ok(key) = std::env::var("STRIPE_SECRET_KEY") {
            if !key.is_empty() {
                self.payment.secret_key = key;
            }
        }
        if let Ok(id) = std::env::var("STRIPE_PRICE_ID") {
            if !id.is_empty() {
                self.payment.price_id = id;
            }
        }
        if let Ok(url) = std::env::var("FRONTEND_URL") {
            if !url.is_empty() {
                self.server.frontend_url = url;
            }
        }
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(secret) = std::env::var("CRON_SECRET") {
            if !secret.is_empty() {
                self.server.cron_secret = Some(secret);
            }
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            if !secret.is_empty() {
                self.auth.token_secret = secret;
            }
        }
    }

    /// Create a default configuration for CLI and test usage
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                port: 8080,
                frontend_url: "http://localhost:3000".to_string(),
                cron_secret: None,
            },
            odds: OddsConfig {
                api_key: String::new(),
                region: "us".to_string(),
                cache_ttl_secs: 300,
                horizon_hours: 168,
                scores_days_from: 3,
                filter: FilterPolicy::Upcoming,
                request_timeout_secs: 10,
                default_sport: Sport::NFL,
            },
            scoring: ScoringConfig::default(),
            storage: StorageConfig {
                data_dir: "data".to_string(),
            },
            auth: AuthConfig {
                token_secret: "dev-secret-change-me".to_string(),
                token_ttl_hours: 72,
            },
            payment: PaymentConfig {
                secret_key: String::new(),
                price_id: String::new(),
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.odds.api_key.is_empty() {
            errors.push("odds.api_key is not set (THE_ODDS_API_KEY)".to_string());
        }

        if self.auth.token_secret.is_empty() {
            errors.push("auth.token_secret is not set (JWT_SECRET)".to_string());
        }

        if url::Url::parse(&self.server.frontend_url).is_err() {
            errors.push(format!(
                "server.frontend_url is not a valid URL: {}",
                self.server.frontend_url
            ));
        }

        if self.odds.request_timeout_secs == 0 {
            errors.push("odds.request_timeout_secs must be positive".to_string());
        }

        if self.odds.horizon_hours <= 0 {
            errors.push("odds.horizon_hours must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_fails_validation_without_api_key() {
        let config = AppConfig::default_config();
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("odds.api_key")));
    }

    #[test]
    fn populated_config_passes_validation() {
        let mut config = AppConfig::default_config();
        config.odds.api_key = "test-key".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn bad_frontend_url_is_rejected() {
        let mut config = AppConfig::default_config();
        config.odds.api_key = "test-key".to_string();
        config.server.frontend_url = "not a url".to_string();
        let errors = config.validate().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("frontend_url")));
    }

    #[test]
    fn logging_directives_follow_the_configured_level() {
        let mut config = AppConfig::default_config();
        assert_eq!(config.logging.filter_directives(), "info,lockbox=debug");
        assert!(!config.logging.json);

        config.logging.level = "warn".to_string();
        assert_eq!(config.logging.filter_directives(), "warn,lockbox=debug");

        // A blank level falls back rather than silencing everything.
        config.logging.level = "  ".to_string();
        assert_eq!(config.logging.filter_directives(), "info,lockbox=debug");
    }
}
