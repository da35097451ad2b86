//! `AlertEngine` — one notification cycle: fetch, curate, classify, render,
//! persist.

use crate::config::EngineConfig;
use crate::domain::render::{MessageRenderer, NOTIFICATION_TITLE};
use crate::domain::tier::{classify, should_vibrate};
use crate::error::{Error, PricesUnavailable};
use crate::fetcher::RetryFetcher;
use crate::http::PriceFeed;
use crate::shared::Tier;
use crate::store::{MemoryStore, PriceStore, Settings};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the host shows for one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub title: String,
    pub text: String,
    pub vibrate: bool,
    /// The feed was down and `text` was rendered from the cached series.
    pub stale: bool,
    pub now_tier: Tier,
}

/// Produces notification payloads. The host calls it once per cycle and
/// never runs two cycles at once.
pub struct AlertEngine {
    fetcher: RetryFetcher,
    store: Arc<dyn PriceStore>,
    renderer: MessageRenderer,
}

impl AlertEngine {
    pub fn builder() -> AlertEngineBuilder {
        AlertEngineBuilder::default()
    }

    pub fn store(&self) -> &Arc<dyn PriceStore> {
        &self.store
    }

    pub async fn produce_notification_payload(
        &self,
    ) -> Result<NotificationPayload, PricesUnavailable> {
        self.produce_notification_payload_at(Utc::now()).await
    }

    /// Run one cycle as of `now`.
    ///
    /// Only `PricesUnavailable` is surfaced: retries and store failures are
    /// absorbed. The last "now" tier is updated on every successful cycle,
    /// stale or not.
    pub async fn produce_notification_payload_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<NotificationPayload, PricesUnavailable> {
        let outcome = self.fetcher.fetch_with_fallback(now).await?;
        let series = &outcome.series;

        let settings = self.settings().await;
        let now_tier = classify(series.now().price, series.peak, series.trough);
        let previous = match self.store.load_last_now_tier().await {
            Ok(tier) => tier,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load last tier");
                None
            }
        };
        let vibrate = should_vibrate(&settings, now_tier, previous);
        if let Err(e) = self.store.save_last_now_tier(now_tier).await {
            tracing::warn!(error = %e, "Failed to save last tier");
        }

        let text = self.renderer.render(series, &series.tiers());

        tracing::info!(
            tier = %now_tier,
            previous = ?previous,
            vibrate,
            stale = outcome.is_stale(),
            points = series.len(),
            "Produced notification"
        );

        Ok(NotificationPayload {
            title: NOTIFICATION_TITLE.to_string(),
            text,
            vibrate,
            stale: outcome.is_stale(),
            now_tier,
        })
    }

    async fn settings(&self) -> Settings {
        let settings = match self.store.load_settings().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load settings, using defaults");
                return Settings::default();
            }
        };
        match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid settings, using defaults");
                Settings::default()
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct AlertEngineBuilder {
    feed: Option<Arc<dyn PriceFeed>>,
    store: Option<Arc<dyn PriceStore>>,
    config: EngineConfig,
}

impl AlertEngineBuilder {
    /// Price source. Defaults to a `PriceFeedClient` on `config.feed_url`.
    pub fn feed(mut self, feed: Arc<dyn PriceFeed>) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Defaults to a fresh `MemoryStore`.
    pub fn store(mut self, store: Arc<dyn PriceStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn feed_url(mut self, url: &str) -> Self {
        self.config.feed_url = url.to_string();
        self
    }

    pub fn timezone(mut self, tz: chrono_tz::Tz) -> Self {
        self.config.timezone = tz;
        self
    }

    pub fn build(self) -> Result<AlertEngine, Error> {
        self.config.validate()?;

        let feed = match self.feed {
            Some(feed) => feed,
            None => default_feed(&self.config.feed_url)?,
        };
        let store: Arc<dyn PriceStore> = match self.store {
            Some(store) => store,
            None => Arc::new(MemoryStore::new()),
        };

        let fetcher = RetryFetcher::new(feed, store.clone())
            .with_retry(self.config.retry.clone())
            .with_curation(self.config.curation.clone())
            .with_horizon(self.config.horizon());

        Ok(AlertEngine {
            fetcher,
            store,
            renderer: MessageRenderer::new(self.config.timezone),
        })
    }
}

#[cfg(feature = "http")]
fn default_feed(url: &str) -> Result<Arc<dyn PriceFeed>, Error> {
    Ok(Arc::new(crate::http::PriceFeedClient::new(url)?))
}

#[cfg(not(feature = "http"))]
fn default_feed(_url: &str) -> Result<Arc<dyn PriceFeed>, Error> {
    Err(crate::error::ConfigError::MissingFeed.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::{PricePoint, PriceSeries};
    use crate::error::{ConfigError, FetchError};
    use crate::http::FetchWindow;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;

    struct FixedFeed(PriceSeries);

    #[async_trait]
    impl PriceFeed for FixedFeed {
        async fn fetch(&self, _window: &FetchWindow) -> Result<PriceSeries, FetchError> {
            Ok(self.0.clone())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap()
    }

    fn series(cents: &[i64]) -> PriceSeries {
        cents
            .iter()
            .enumerate()
            .map(|(h, c)| PricePoint::new(now() + Duration::hours(h as i64), Decimal::new(*c, 2)))
            .collect()
    }

    fn engine(cents: &[i64], store: Arc<MemoryStore>) -> AlertEngine {
        AlertEngine::builder()
            .feed(Arc::new(FixedFeed(series(cents))))
            .store(store)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_payload_fields() {
        let store = Arc::new(MemoryStore::new());
        let payload = engine(&[10, 50, 90], store.clone())
            .produce_notification_payload_at(now())
            .await
            .unwrap();

        assert_eq!(payload.title, NOTIFICATION_TITLE);
        assert!(payload.text.starts_with("💡 |  Now "));
        assert_eq!(payload.text.lines().count(), 3);
        assert_eq!(payload.now_tier, Tier::CriticalLow);
        assert!(!payload.stale);
        assert!(!payload.vibrate);
        assert_eq!(store.state().await.last_now_tier, Some(Tier::CriticalLow));
    }

    #[tokio::test]
    async fn test_vibrate_requires_setting() {
        let store = Arc::new(MemoryStore::new());
        let payload = engine(&[90, 10, 50], store)
            .produce_notification_payload_at(now())
            .await
            .unwrap();
        assert_eq!(payload.now_tier, Tier::CriticalHigh);
        assert!(!payload.vibrate);
    }

    #[tokio::test]
    async fn test_invalid_settings_fall_back_to_defaults() {
        let store = Arc::new(MemoryStore::with_settings(Settings {
            vibrate: true,
            quiet_start_hour: 42,
            quiet_end_hour: 6,
        }));
        let payload = engine(&[90, 10, 50], store)
            .produce_notification_payload_at(now())
            .await
            .unwrap();
        assert!(!payload.vibrate);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.curation.max_points = 2;
        let result = AlertEngine::builder()
            .feed(Arc::new(FixedFeed(PriceSeries::new())))
            .config(config)
            .build();
        assert!(matches!(result, Err(Error::Config(ConfigError::TooFewPoints { .. }))));
    }
}
