//! Price feed URL and fixed query parameters.

/// Default day-ahead price endpoint (EnergyZero v1).
pub const DEFAULT_FEED_URL: &str = "https://api.energyzero.nl/v1/energyprices";

/// `interval=4` selects hourly slots.
pub const INTERVAL: &str = "4";

/// `usageType=1` selects electricity.
pub const USAGE_TYPE: &str = "1";

/// Prices include VAT.
pub const INCL_BTW: &str = "true";

/// Civil timezone prices are compared and displayed in.
pub const DEFAULT_TIMEZONE: chrono_tz::Tz = chrono_tz::Europe::Amsterdam;
