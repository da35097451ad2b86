//! Edge-triggered vibration decision.

use crate::shared::Tier;
use crate::store::Settings;

/// Vibrate only when entering an elevated tier, never while staying in one.
///
/// A missing previous tier (first run) counts as not elevated.
pub fn should_vibrate(settings: &Settings, now_tier: Tier, previous: Option<Tier>) -> bool {
    settings.vibrate && now_tier.is_elevated() && !previous.is_some_and(|t| t.is_elevated())
}
