//! Host-owned settings read by the engine.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Notification preferences. Owned by the host; the engine only reads them.
///
/// Quiet hours are enforced by the host's scheduler, which does not run a
/// cycle inside them. They are stored here so hosts keep one settings record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub vibrate: bool,
    /// Civil hour (0..=23) quiet time starts.
    pub quiet_start_hour: u8,
    /// Civil hour (0..=23) quiet time ends.
    pub quiet_end_hour: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vibrate: false,
            quiet_start_hour: 21,
            quiet_end_hour: 6,
        }
    }
}

impl Settings {
    pub fn new(vibrate: bool, quiet_start_hour: u8, quiet_end_hour: u8) -> Result<Self, ConfigError> {
        let settings = Self {
            vibrate,
            quiet_start_hour,
            quiet_end_hour,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for hour in [self.quiet_start_hour, self.quiet_end_hour] {
            if hour > 23 {
                return Err(ConfigError::HourOutOfRange(hour));
            }
        }
        Ok(())
    }
}
