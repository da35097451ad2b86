//! Unified error types.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Unavailable(#[from] PricesUnavailable),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// A single failed request against the price feed.
///
/// Every variant is retryable: the feed is assumed to recover on its own.
#[derive(Error, Debug)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Timeout")]
    Timeout,

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Malformed(e.to_string())
    }
}

/// The feed answered, but no price survived the time filter.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No prices left after filtering")]
pub struct EmptySeriesError;

/// What one attempt of the retry loop can fail with.
#[derive(Error, Debug)]
pub enum AttemptError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    EmptySeries(#[from] EmptySeriesError),
}

/// Retries are exhausted and there is no usable cached series.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Prices are currently unavailable after {attempts} attempts: {last_error}")]
pub struct PricesUnavailable {
    pub attempts: u32,
    pub last_error: String,
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Invalid tunables or host settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Hour out of range (0..=23): {0}")]
    HourOutOfRange(u8),

    #[error("max_points must be at least {min}, got {got}")]
    TooFewPoints { min: usize, got: usize },

    #[error("keep_initial must be at least 1")]
    NoInitialPoints,

    #[error("max_attempts must be at least 1")]
    NoAttempts,

    #[error("horizon_hours must be positive")]
    EmptyHorizon,

    #[error("sampling_power must be a positive finite number, got {0}")]
    InvalidSamplingPower(String),

    #[error("No price feed configured")]
    MissingFeed,
}
