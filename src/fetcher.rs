//! `RetryFetcher` — bounded retries against a `PriceFeed`, falling back to the
//! last cached series when the feed stays down.

use crate::domain::curation::{curate, CuratedSeries, CurationConfig};
use crate::error::{AttemptError, FetchError, PricesUnavailable};
use crate::http::{FetchWindow, PriceFeed, RetryConfig};
use crate::store::PriceStore;

use chrono::{DateTime, Duration, Utc};
use futures_timer::Delay;
use futures_util::future::{select, Either};
use std::sync::Arc;

/// Whether a series came from this cycle's fetch or from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale,
}

/// Result of `RetryFetcher::fetch_with_fallback`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub series: CuratedSeries,
    pub freshness: Freshness,
}

impl FetchOutcome {
    pub fn is_stale(&self) -> bool {
        self.freshness == Freshness::Stale
    }
}

pub struct RetryFetcher {
    feed: Arc<dyn PriceFeed>,
    store: Arc<dyn PriceStore>,
    retry: RetryConfig,
    curation: CurationConfig,
    horizon: Duration,
}

impl RetryFetcher {
    pub fn new(feed: Arc<dyn PriceFeed>, store: Arc<dyn PriceStore>) -> Self {
        Self {
            feed,
            store,
            retry: RetryConfig::default(),
            curation: CurationConfig::default(),
            horizon: Duration::hours(48),
        }
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_curation(mut self, curation: CurationConfig) -> Self {
        self.curation = curation;
        self
    }

    pub fn with_horizon(mut self, horizon: Duration) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn curation(&self) -> &CurationConfig {
        &self.curation
    }

    /// Fetch and curate a fresh series, or fall back to the cached one.
    ///
    /// A fresh series is cached before it is returned. The cache is left
    /// untouched when every attempt fails.
    pub async fn fetch_with_fallback(
        &self,
        now: DateTime<Utc>,
    ) -> Result<FetchOutcome, PricesUnavailable> {
        let window = FetchWindow::around(now, self.curation.lookback, self.horizon);
        let max = self.retry.max_attempts;
        let mut last_error: Option<AttemptError> = None;

        for attempt in 0..max {
            match self.attempt(&window, now).await {
                Ok(series) => {
                    if let Err(e) = self.store.save_cached_series(&series).await {
                        tracing::warn!(error = %e, "Failed to cache curated series");
                    }
                    tracing::debug!(attempt = attempt + 1, points = series.len(), "Fetched prices");
                    return Ok(FetchOutcome {
                        series,
                        freshness: Freshness::Fresh,
                    });
                }
                Err(e) => {
                    if attempt + 1 < max {
                        let delay = self.retry.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Retrying price fetch"
                        );
                        Delay::new(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        let last_error = last_error.map_or_else(|| "no attempts made".to_string(), |e| e.to_string());
        self.fallback(now, max, last_error).await
    }

    async fn attempt(
        &self,
        window: &FetchWindow,
        now: DateTime<Utc>,
    ) -> Result<CuratedSeries, AttemptError> {
        let fetch = self.feed.fetch(window);
        let timeout = Delay::new(self.retry.attempt_timeout);
        let series = match select(fetch, timeout).await {
            Either::Left((result, _)) => result?,
            Either::Right(_) => return Err(FetchError::Timeout.into()),
        };
        Ok(curate(&series, &self.curation, now)?)
    }

    async fn fallback(
        &self,
        now: DateTime<Utc>,
        attempts: u32,
        last_error: String,
    ) -> Result<FetchOutcome, PricesUnavailable> {
        let cached = match self.store.load_cached_series().await {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load cached series");
                None
            }
        };

        // Cached points that are no longer current are dropped like fresh ones.
        match cached.and_then(|series| series.since(now - self.curation.lookback)) {
            Some(series) => {
                tracing::warn!(
                    attempts,
                    error = %last_error,
                    points = series.len(),
                    "Price feed unavailable, using cached series"
                );
                Ok(FetchOutcome {
                    series,
                    freshness: Freshness::Stale,
                })
            }
            None => Err(PricesUnavailable {
                attempts,
                last_error,
            }),
        }
    }
}
