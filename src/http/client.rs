//! `PriceFeedClient` — one GET against the day-ahead price endpoint.

use crate::domain::price::wire::PricesResponse;
use crate::domain::price::PriceSeries;
use crate::error::FetchError;
use crate::http::{FetchWindow, PriceFeed};
use crate::network::DEFAULT_FEED_URL;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// HTTP client for the price feed. Makes exactly one request per `fetch`.
#[derive(Debug, Clone)]
pub struct PriceFeedClient {
    base_url: String,
    client: Client,
}

impl PriceFeedClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder
                .timeout(Duration::from_secs(30))
                .pool_max_idle_per_host(2);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    /// Client for the default EnergyZero endpoint.
    pub fn energyzero() -> Result<Self, FetchError> {
        Self::new(DEFAULT_FEED_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, window: &FetchWindow) -> String {
        format!("{}?{}", self.base_url, window.query_string())
    }

    async fn do_request(&self, url: &str) -> Result<PricesResponse, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl PriceFeed for PriceFeedClient {
    async fn fetch(&self, window: &FetchWindow) -> Result<PriceSeries, FetchError> {
        let url = self.url_for(window);
        tracing::debug!(from = %window.start, till = %window.end, "Fetching prices");
        let response = self.do_request(&url).await?;
        PriceSeries::try_from(response)
    }
}
