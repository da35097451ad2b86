//! Persistence — the narrow interface the engine reads and writes cross-cycle
//! state through.

pub mod file;
pub mod memory;
pub mod settings;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use settings::Settings;

use crate::domain::curation::CuratedSeries;
use crate::error::StoreError;
use crate::shared::Tier;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// State carried from one cycle to the next. Empty on first run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationState {
    /// Last successfully curated series, the stale fallback.
    pub last_curated_series: Option<CuratedSeries>,
    /// Tier of the "now" point when the last notification was produced.
    pub last_now_tier: Option<Tier>,
}

/// Key-value persistence for settings and notification state.
///
/// Writes happen only after a fully successful step, so implementations need
/// each individual write to be atomic but nothing more.
#[async_trait]
pub trait PriceStore: Send + Sync {
    async fn load_settings(&self) -> Result<Settings, StoreError>;
    async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError>;

    async fn load_cached_series(&self) -> Result<Option<CuratedSeries>, StoreError>;
    async fn save_cached_series(&self, series: &CuratedSeries) -> Result<(), StoreError>;

    async fn load_last_now_tier(&self) -> Result<Option<Tier>, StoreError>;
    async fn save_last_now_tier(&self, tier: Tier) -> Result<(), StoreError>;
}
