//! Engine tunables.

use crate::domain::curation::CurationConfig;
use crate::error::ConfigError;
use crate::http::RetryConfig;
use crate::network::{DEFAULT_FEED_URL, DEFAULT_TIMEZONE};
use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Everything `AlertEngine` can be tuned with. `Default` matches the
/// production schedule: a 48h horizon polled three times, 15s per attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub feed_url: String,
    /// How far ahead of now prices are requested.
    pub horizon_hours: u32,
    pub retry: RetryConfig,
    pub curation: CurationConfig,
    /// Civil timezone for day boundaries and clock labels.
    pub timezone: Tz,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            horizon_hours: 48,
            retry: RetryConfig::default(),
            curation: CurationConfig::default(),
            timezone: DEFAULT_TIMEZONE,
        }
    }
}

impl EngineConfig {
    pub fn horizon(&self) -> Duration {
        Duration::hours(i64::from(self.horizon_hours))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_hours == 0 {
            return Err(ConfigError::EmptyHorizon);
        }
        self.retry.validate()?;
        self.curation.validate()
    }
}
