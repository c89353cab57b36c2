use thiserror::Error;

/// Main error type for the picks backend
#[derive(Error, Debug)]
pub enum LockboxError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream provider error: {0}")]
    Upstream(String),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Domain errors
    #[error("Unknown sport: {0}")]
    UnknownSport(String),

    #[error("Market data unavailable: {0}")]
    MarketDataUnavailable(String),

    // Payment errors
    #[error("Payment provider error: {0}")]
    Payment(String),

    // Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Storage errors
    #[error("Store error: {0}")]
    Store(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for LockboxError
pub type Result<T> = std::result::Result<T, LockboxError>;
