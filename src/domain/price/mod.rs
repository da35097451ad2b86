//! Price domain — timestamped prices and chronologically ordered series.

mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single price slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricePoint {
    /// Start of the slot.
    pub timestamp: DateTime<Utc>,
    /// Price per kWh in euros.
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self { timestamp, price }
    }
}

/// Prices ordered by timestamp, ascending, with unique timestamps.
///
/// Inserting a timestamp that is already present replaces its price: the most
/// recent write is authoritative when overlapping fetch windows disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceSeries {
    points: BTreeMap<DateTime<Utc>, Decimal>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from points in any order (last write wins).
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let mut series = Self::new();
        for point in points {
            series.insert(point);
        }
        series
    }

    /// Insert or replace the price for a timestamp.
    pub fn insert(&mut self, point: PricePoint) {
        self.points.insert(point.timestamp, point.price);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = PricePoint> + '_ {
        self.points
            .iter()
            .map(|(timestamp, price)| PricePoint::new(*timestamp, *price))
    }

    pub fn to_vec(&self) -> Vec<PricePoint> {
        self.iter().collect()
    }

    pub fn first(&self) -> Option<PricePoint> {
        self.points
            .first_key_value()
            .map(|(timestamp, price)| PricePoint::new(*timestamp, *price))
    }

    pub fn last(&self) -> Option<PricePoint> {
        self.points
            .last_key_value()
            .map(|(timestamp, price)| PricePoint::new(*timestamp, *price))
    }

    /// Highest price, `None` for an empty series.
    pub fn peak(&self) -> Option<Decimal> {
        self.points.values().copied().max()
    }

    /// Lowest price, `None` for an empty series.
    pub fn trough(&self) -> Option<Decimal> {
        self.points.values().copied().min()
    }

    /// Keep only points at or after `start`.
    pub fn filter_from(&self, start: DateTime<Utc>) -> PriceSeries {
        Self {
            points: self
                .points
                .range(start..)
                .map(|(timestamp, price)| (*timestamp, *price))
                .collect(),
        }
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}
