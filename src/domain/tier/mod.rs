//! Tier domain — classify prices against the day's range and decide when a
//! notification should vibrate.

pub mod vibration;

use crate::shared::Tier;
use rust_decimal::Decimal;

pub use vibration::should_vibrate;

/// Ranges narrower than this (in euros) are too flat to call anything high.
pub const MIN_MEANINGFUL_RANGE: Decimal = Decimal::from_parts(6, 0, 0, false, 2);

/// Ranges must exceed this for the `Low` tier to apply.
pub const MIN_LOW_TIER_RANGE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Peak/trough pair with the derived tier thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub peak: Decimal,
    pub trough: Decimal,
}

impl PriceRange {
    pub fn new(peak: Decimal, trough: Decimal) -> Self {
        Self { peak, trough }
    }

    pub fn width(&self) -> Decimal {
        self.peak - self.trough
    }

    /// Prices above this are `CriticalHigh` (top 10%).
    pub fn critical_high_threshold(&self) -> Decimal {
        self.peak - Decimal::new(1, 1) * self.width()
    }

    /// Prices above this are at least `High` (top 40%).
    pub fn high_threshold(&self) -> Decimal {
        self.peak - Decimal::new(4, 1) * self.width()
    }

    /// Prices below this are `CriticalLow` (bottom 10%).
    pub fn critical_low_threshold(&self) -> Decimal {
        self.trough + Decimal::new(1, 1) * self.width()
    }

    /// Prices below this are at least `Low` (bottom 30%).
    pub fn low_threshold(&self) -> Decimal {
        self.trough + Decimal::new(3, 1) * self.width()
    }

    /// Classify `price` against this range. First matching rule wins.
    pub fn classify(&self, price: Decimal) -> Tier {
        let width = self.width();
        if width <= Decimal::ZERO {
            return Tier::Neutral;
        }
        // The literal minimum always wins, however narrow the range.
        if price == self.trough {
            return Tier::CriticalLow;
        }
        if width < MIN_MEANINGFUL_RANGE {
            return Tier::Neutral;
        }
        if price > self.critical_high_threshold() {
            return Tier::CriticalHigh;
        }
        if price == self.peak || price > self.high_threshold() {
            return Tier::High;
        }
        if price < self.critical_low_threshold() {
            return Tier::CriticalLow;
        }
        if price < self.low_threshold() && width > MIN_LOW_TIER_RANGE {
            return Tier::Low;
        }
        Tier::Neutral
    }
}

/// Classify a price against a series' peak and trough.
pub fn classify(price: Decimal, peak: Decimal, trough: Decimal) -> Tier {
    PriceRange::new(peak, trough).classify(price)
}
