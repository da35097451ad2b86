//! Curation domain — reduce a raw price series to a small, extremum-preserving
//! subset for display.
//!
//! The curated series always keeps:
//! - the first ("now") point,
//! - the first `keep_initial` points in full resolution,
//! - the earliest max and min of each temporal half (the special points),
//!
//! and fills the remaining slots with a power-law spread over the rest, denser
//! toward the end of the window. Peak and trough are taken over the whole
//! filtered series, not the subset.

pub mod select;

use crate::domain::price::{PricePoint, PriceSeries};
use crate::domain::tier::classify;
use crate::error::{ConfigError, EmptySeriesError};
use crate::shared::Tier;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub use select::MAX_SPECIAL_POINTS;

// ─── Config ──────────────────────────────────────────────────────────────────

/// Tunables for `curate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurationConfig {
    /// Upper bound on the curated series length.
    pub max_points: usize,
    /// Leading points always kept.
    pub keep_initial: usize,
    /// Exponent of the fill spread. Above 1 bunches samples late.
    pub sampling_power: f64,
    /// Points starting earlier than `now - lookback` are dropped, so the slot
    /// that is currently active survives even if it began in the past.
    #[serde(with = "lookback_secs")]
    pub lookback: Duration,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            max_points: 10,
            keep_initial: 4,
            sampling_power: 1.8,
            lookback: Duration::hours(1),
        }
    }
}

impl CurationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Room for every special point plus the "now" point.
        let min = MAX_SPECIAL_POINTS + 1;
        if self.max_points < min {
            return Err(ConfigError::TooFewPoints {
                min,
                got: self.max_points,
            });
        }
        if self.keep_initial == 0 {
            return Err(ConfigError::NoInitialPoints);
        }
        if !self.sampling_power.is_finite() || self.sampling_power <= 0.0 {
            return Err(ConfigError::InvalidSamplingPower(
                self.sampling_power.to_string(),
            ));
        }
        Ok(())
    }
}

mod lookback_secs {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(d)?;
        Ok(Duration::seconds(secs))
    }
}

// ─── CuratedSeries ───────────────────────────────────────────────────────────

/// A size-capped, chronologically sorted subset of a price series, with the
/// peak and trough of the full series it was taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedSeries {
    points: Vec<PricePoint>,
    pub peak: Decimal,
    pub trough: Decimal,
    pub curated_at: DateTime<Utc>,
}

impl CuratedSeries {
    /// Points in chronological order. Never empty.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// The first point: the currently active price slot.
    pub fn now(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tier of every point against this series' peak and trough.
    pub fn tiers(&self) -> BTreeMap<DateTime<Utc>, Tier> {
        self.points
            .iter()
            .map(|p| (p.timestamp, classify(p.price, self.peak, self.trough)))
            .collect()
    }

    /// Drop points earlier than `start`, keeping the stored peak and trough.
    ///
    /// Returns `None` when nothing remains.
    pub fn since(&self, start: DateTime<Utc>) -> Option<CuratedSeries> {
        let points: Vec<PricePoint> = self
            .points
            .iter()
            .copied()
            .filter(|p| p.timestamp >= start)
            .collect();
        if points.is_empty() {
            return None;
        }
        Some(Self {
            points,
            peak: self.peak,
            trough: self.trough,
            curated_at: self.curated_at,
        })
    }
}

// ─── Curation ────────────────────────────────────────────────────────────────

/// Why a point is in the selection. Ordered by retention priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Role {
    Sampled,
    Initial,
    Special,
    Now,
}

/// Filter `series` to the active window and reduce it to at most
/// `config.max_points` points.
pub fn curate(
    series: &PriceSeries,
    config: &CurationConfig,
    now: DateTime<Utc>,
) -> Result<CuratedSeries, EmptySeriesError> {
    let filtered = series.filter_from(now - config.lookback);
    let (Some(peak), Some(trough)) = (filtered.peak(), filtered.trough()) else {
        return Err(EmptySeriesError);
    };

    let entries = filtered.to_vec();
    let points = if entries.len() <= config.max_points {
        entries
    } else {
        reduce(&entries, config)
    };

    tracing::debug!(
        source = filtered.len(),
        points = points.len(),
        %peak,
        %trough,
        "Curated price series"
    );

    Ok(CuratedSeries {
        points,
        peak,
        trough,
        curated_at: now,
    })
}

fn reduce(entries: &[PricePoint], config: &CurationConfig) -> Vec<PricePoint> {
    let mut selection: BTreeMap<usize, Role> = BTreeMap::new();
    for idx in 0..config.keep_initial.min(entries.len()) {
        promote(&mut selection, idx, Role::Initial);
    }
    for idx in select::special_points(entries) {
        promote(&mut selection, idx, Role::Special);
    }
    promote(&mut selection, 0, Role::Now);

    if selection.len() < config.max_points {
        fill(entries, config, &mut selection);
    }

    if selection.len() > config.max_points {
        trim(config.max_points, &mut selection);
    }

    selection.keys().map(|&idx| entries[idx]).collect()
}

/// Record `idx` with `role`, keeping the higher role if already selected.
fn promote(selection: &mut BTreeMap<usize, Role>, idx: usize, role: Role) {
    let slot = selection.entry(idx).or_insert(role);
    *slot = (*slot).max(role);
}

/// Spread the free slots over the not-yet-selected remainder.
fn fill(entries: &[PricePoint], config: &CurationConfig, selection: &mut BTreeMap<usize, Role>) {
    let remaining: Vec<usize> = (0..entries.len())
        .filter(|idx| !selection.contains_key(idx))
        .collect();
    if remaining.is_empty() {
        return;
    }

    let need = (config.max_points - selection.len()).min(remaining.len());
    let mut taken = vec![false; remaining.len()];
    for i in 0..need {
        let target = select::power_law_index(i, need, remaining.len(), config.sampling_power);
        // Collisions move to the nearest free slot so the series fills up.
        if let Some(slot) = select::nearest_free(&taken, target) {
            taken[slot] = true;
            selection.insert(remaining[slot], Role::Sampled);
        }
    }
}

/// Drop the lowest-priority points, latest first, until `max_points` remain.
/// Special points and the "now" point are never dropped.
fn trim(max_points: usize, selection: &mut BTreeMap<usize, Role>) {
    let mut droppable: Vec<(Role, usize)> = selection
        .iter()
        .filter(|(_, role)| **role < Role::Special)
        .map(|(idx, role)| (*role, *idx))
        .collect();
    droppable.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let excess = selection.len().saturating_sub(max_points);
    let dropped: BTreeSet<usize> = droppable
        .into_iter()
        .take(excess)
        .map(|(_, idx)| idx)
        .collect();
    selection.retain(|idx, _| !dropped.contains(idx));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn hourly(prices: &[&str]) -> PriceSeries {
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| {
                PricePoint::new(
                    start() + Duration::hours(i as i64),
                    Decimal::from_str(p).unwrap(),
                )
            })
            .collect()
    }

    fn ascending(n: usize) -> PriceSeries {
        let prices: Vec<String> = (1..=n).map(|i| format!("{}.0", i)).collect();
        let refs: Vec<&str> = prices.iter().map(String::as_str).collect();
        hourly(&refs)
    }

    fn assert_sorted_unique(series: &CuratedSeries) {
        for pair in series.points().windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn test_small_series_unchanged() {
        let series = hourly(&["0.30", "0.25", "0.41", "0.12"]);
        let curated = curate(&series, &CurationConfig::default(), start()).unwrap();
        assert_eq!(curated.points(), series.to_vec().as_slice());
    }

    #[test]
    fn test_exactly_max_points_unchanged() {
        let series = ascending(10);
        let curated = curate(&series, &CurationConfig::default(), start()).unwrap();
        assert_eq!(curated.len(), 10);
        assert_eq!(curated.points(), series.to_vec().as_slice());
    }

    #[test]
    fn test_twelve_ascending_points() {
        let series = ascending(12);
        let curated = curate(&series, &CurationConfig::default(), start()).unwrap();
        assert_eq!(curated.len(), 10);
        assert_eq!(curated.peak, Decimal::from_str("12.0").unwrap());
        assert_eq!(curated.trough, Decimal::from_str("1.0").unwrap());
        let prices: Vec<_> = curated.points().iter().map(|p| p.price).collect();
        assert!(prices.contains(&Decimal::from_str("1.0").unwrap()));
        assert!(prices.contains(&Decimal::from_str("12.0").unwrap()));
        assert_sorted_unique(&curated);
    }

    #[test]
    fn test_extrema_kept_when_buried_mid_window() {
        // 48 hourly points; the trough and peak fall in the middle of each half.
        let mut prices: Vec<String> = (0..48).map(|i| format!("0.{:02}", 30 + (i % 7))).collect();
        prices[13] = "0.02".to_string();
        prices[37] = "0.91".to_string();
        let refs: Vec<&str> = prices.iter().map(String::as_str).collect();
        let series = hourly(&refs);

        let curated = curate(&series, &CurationConfig::default(), start()).unwrap();
        assert_eq!(curated.len(), 10);
        assert_sorted_unique(&curated);
        let kept: Vec<_> = curated.points().iter().map(|p| p.timestamp).collect();
        assert!(kept.contains(&(start() + Duration::hours(13))));
        assert!(kept.contains(&(start() + Duration::hours(37))));
        assert_eq!(curated.peak, Decimal::from_str("0.91").unwrap());
        assert_eq!(curated.trough, Decimal::from_str("0.02").unwrap());
    }

    #[test]
    fn test_initial_points_kept() {
        let series = ascending(30);
        let curated = curate(&series, &CurationConfig::default(), start()).unwrap();
        let first_four: Vec<_> = series.to_vec().into_iter().take(4).collect();
        assert_eq!(&curated.points()[..4], first_four.as_slice());
    }

    #[test]
    fn test_fill_reaches_end_of_window() {
        let series = ascending(48);
        let curated = curate(&series, &CurationConfig::default(), start()).unwrap();
        assert_eq!(curated.len(), 10);
        let kept: Vec<_> = curated.points().iter().map(|p| p.timestamp).collect();
        assert!(kept.contains(&(start() + Duration::hours(46))));
        assert!(kept.contains(&(start() + Duration::hours(47))));
    }

    #[test]
    fn test_peak_and_trough_from_full_series() {
        let series = ascending(40);
        let curated = curate(&series, &CurationConfig::default(), start()).unwrap();
        assert_eq!(curated.peak, Decimal::from(40));
        assert_eq!(curated.trough, Decimal::from(1));
    }

    #[test]
    fn test_points_before_lookback_dropped() {
        let series = hourly(&["0.50", "0.10", "0.20", "0.30"]);
        // Two hours in: the 12:00 slot is more than an hour old.
        let now = start() + Duration::hours(2);
        let curated = curate(&series, &CurationConfig::default(), now).unwrap();
        assert_eq!(curated.len(), 3);
        assert_eq!(curated.now().timestamp, start() + Duration::hours(1));
        assert_eq!(curated.peak, Decimal::from_str("0.30").unwrap());
    }

    #[test]
    fn test_all_points_in_past_is_empty() {
        let series = hourly(&["0.50", "0.10"]);
        let now = start() + Duration::hours(5);
        assert_eq!(
            curate(&series, &CurationConfig::default(), now),
            Err(EmptySeriesError)
        );
    }

    #[test]
    fn test_trim_keeps_specials_with_small_budget() {
        let config = CurationConfig {
            max_points: 5,
            keep_initial: 4,
            ..CurationConfig::default()
        };
        let series = hourly(&[
            "0.30", "0.31", "0.32", "0.33", "0.90", "0.05", "0.34", "0.35", "0.99", "0.01", "0.36",
            "0.37",
        ]);
        let curated = curate(&series, &config, start()).unwrap();
        assert_eq!(curated.len(), 5);
        let prices: Vec<String> = curated.points().iter().map(|p| p.price.to_string()).collect();
        assert_eq!(prices[0], "0.30");
        for extreme in ["0.90", "0.05", "0.99", "0.01"] {
            assert!(prices.contains(&extreme.to_string()), "missing {extreme}");
        }
    }

    #[test]
    fn test_tiers_keyed_by_timestamp() {
        let series = ascending(3);
        let curated = curate(&series, &CurationConfig::default(), start()).unwrap();
        let tiers = curated.tiers();
        assert_eq!(tiers[&start()], Tier::CriticalLow);
        assert_eq!(tiers[&(start() + Duration::hours(2))], Tier::CriticalHigh);
    }

    #[test]
    fn test_since_filters_and_keeps_range() {
        let series = ascending(5);
        let curated = curate(&series, &CurationConfig::default(), start()).unwrap();
        let later = curated.since(start() + Duration::hours(3)).unwrap();
        assert_eq!(later.len(), 2);
        assert_eq!(later.trough, Decimal::from(1));
        assert!(curated.since(start() + Duration::hours(10)).is_none());
    }

    #[test]
    fn test_validate_rejects_tiny_budget() {
        let config = CurationConfig {
            max_points: 3,
            ..CurationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooFewPoints { min: 5, got: 3 })
        ));
        assert!(CurationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_serde_lookback_in_seconds() {
        let json = serde_json::to_string(&CurationConfig::default()).unwrap();
        assert!(json.contains("\"lookback\":3600"));
    }
}
