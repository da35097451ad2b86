//! Shared newtypes and utilities used across all domain modules.

pub mod civil;
pub mod fmt;

pub use civil::{clock_label, in_civil, is_new_day};

use serde::{Deserialize, Serialize};

// ─── Tier ────────────────────────────────────────────────────────────────────

/// Qualitative severity of a price relative to the series' peak and trough.
///
/// Variants are listed from most to least expensive. `Neutral` covers both the
/// middle of the range and every point of a flat or near-flat series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    CriticalHigh,
    High,
    Neutral,
    Low,
    CriticalLow,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CriticalHigh => "critical_high",
            Self::High => "high",
            Self::Neutral => "neutral",
            Self::Low => "low",
            Self::CriticalLow => "critical_low",
        }
    }

    /// `CriticalHigh` or `High`: the tiers that may trigger a vibration.
    pub fn is_elevated(&self) -> bool {
        matches!(self, Self::CriticalHigh | Self::High)
    }

    /// Suffix glyph appended after the price column. Empty for `Neutral`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::CriticalHigh => "‼\u{FE0F}",
            Self::High => "❗",
            Self::Neutral => "",
            Self::Low => "🌱",
            Self::CriticalLow => "⭐",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
