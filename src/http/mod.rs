//! HTTP layer — the `PriceFeed` seam and its reqwest implementation.

#[cfg(feature = "http")]
pub mod client;
pub mod retry;

#[cfg(feature = "http")]
pub use client::PriceFeedClient;
pub use retry::RetryConfig;

use crate::domain::price::PriceSeries;
use crate::error::FetchError;
use crate::network;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// Query timestamp format: UTC with a fixed millisecond field.
const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";

// ─── FetchWindow ─────────────────────────────────────────────────────────────

/// UTC time range requested from the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl FetchWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `[now - lookback, now + horizon]`. The lookback keeps the slot that is
    /// currently active even though it started in the past.
    pub fn around(now: DateTime<Utc>, lookback: Duration, horizon: Duration) -> Self {
        Self::new(now - lookback, now + horizon)
    }

    /// Query parameters for the feed, unencoded.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("fromDate", self.start.format(QUERY_TIME_FORMAT).to_string()),
            ("tillDate", self.end.format(QUERY_TIME_FORMAT).to_string()),
            ("interval", network::INTERVAL.to_string()),
            ("usageType", network::USAGE_TYPE.to_string()),
            ("inclBtw", network::INCL_BTW.to_string()),
        ]
    }

    /// Percent-encoded query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

// ─── PriceFeed ───────────────────────────────────────────────────────────────

/// A single-attempt source of price series. Retries live in `RetryFetcher`.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch(&self, window: &FetchWindow) -> Result<PriceSeries, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 15).unwrap()
    }

    #[test]
    fn test_window_around_now() {
        let window = FetchWindow::around(now(), Duration::hours(1), Duration::hours(48));
        assert_eq!(window.start, Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 15).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 15).unwrap());
    }

    #[test]
    fn test_query_pairs_format() {
        let window = FetchWindow::around(now(), Duration::hours(1), Duration::hours(48));
        let pairs = window.query_pairs();
        assert_eq!(pairs[0], ("fromDate", "2026-10-16T08:30:15.000Z".to_string()));
        assert_eq!(pairs[1], ("tillDate", "2026-10-18T09:30:15.000Z".to_string()));
        assert_eq!(pairs[2], ("interval", "4".to_string()));
        assert_eq!(pairs[3], ("usageType", "1".to_string()));
        assert_eq!(pairs[4], ("inclBtw", "true".to_string()));
    }

    #[test]
    fn test_query_string_encodes_colons() {
        let window = FetchWindow::around(now(), Duration::hours(1), Duration::hours(48));
        let query = window.query_string();
        assert!(query.starts_with("fromDate=2026-10-16T08%3A30%3A15.000Z&tillDate="));
        assert!(query.ends_with("&interval=4&usageType=1&inclBtw=true"));
    }
}
