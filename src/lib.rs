//! # prijswijs
//!
//! Day-ahead electricity price curation and alerting for a periodic
//! push-notification.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Prices, curation, tiering and rendering (pure, no I/O)
//! 2. **Persistence** — `PriceStore` with in-memory and JSON file stores
//! 3. **HTTP** — `PriceFeed` seam and the reqwest-backed `PriceFeedClient`
//! 4. **Fetching** — `RetryFetcher`: timeout, retry and stale fallback
//! 5. **Engine** — `AlertEngine::produce_notification_payload`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use prijswijs::prelude::*;
//!
//! let engine = AlertEngine::builder()
//!     .store(Arc::new(JsonFileStore::open("/data/prijswijs")?))
//!     .build()?;
//!
//! match engine.produce_notification_payload().await {
//!     Ok(payload) => show(&payload.title, &payload.text, payload.vibrate),
//!     Err(_) => show(UPDATE_FAILED_TITLE, "", false),
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared types and formatting helpers.
pub mod shared;

/// Domain modules (vertical slices): price, curation, tier, render.
pub mod domain;

/// Unified error types.
pub mod error;

/// Feed URL and query constants.
pub mod network;

/// Engine tunables.
pub mod config;

// ── Layer 2: Persistence ─────────────────────────────────────────────────────

/// Settings and cross-cycle notification state.
pub mod store;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Price feed trait and HTTP client.
pub mod http;

// ── Layer 4: Fetching ────────────────────────────────────────────────────────

/// Retry with per-attempt timeout and cached fallback.
pub mod fetcher;

// ── Layer 5: Engine ──────────────────────────────────────────────────────────

/// `AlertEngine` — the entry point the host calls once per cycle.
pub mod engine;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared
    pub use crate::shared::Tier;

    // Domain types
    pub use crate::domain::curation::{curate, CuratedSeries, CurationConfig};
    pub use crate::domain::price::{PricePoint, PriceSeries};
    pub use crate::domain::render::{MessageRenderer, NOTIFICATION_TITLE, UPDATE_FAILED_TITLE};
    pub use crate::domain::tier::{classify, should_vibrate, PriceRange};

    // Errors
    pub use crate::error::{
        ConfigError, EmptySeriesError, Error, FetchError, PricesUnavailable, StoreError,
    };

    // Config + network
    pub use crate::config::EngineConfig;
    pub use crate::network::{DEFAULT_FEED_URL, DEFAULT_TIMEZONE};

    // Persistence
    pub use crate::store::{JsonFileStore, MemoryStore, NotificationState, PriceStore, Settings};

    // HTTP + fetching
    #[cfg(feature = "http")]
    pub use crate::http::PriceFeedClient;
    pub use crate::http::{FetchWindow, PriceFeed, RetryConfig};
    pub use crate::fetcher::{FetchOutcome, Freshness, RetryFetcher};

    // Engine
    pub use crate::engine::{AlertEngine, AlertEngineBuilder, NotificationPayload};
}
