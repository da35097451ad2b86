//! In-memory store, for tests and hosts that persist state themselves.

use super::{NotificationState, PriceStore, Settings};
use crate::domain::curation::CuratedSeries;
use crate::error::StoreError;
use crate::shared::Tier;
use async_lock::RwLock;
use async_trait::async_trait;

#[derive(Debug, Default)]
pub struct MemoryStore {
    settings: RwLock<Settings>,
    state: RwLock<NotificationState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
            state: RwLock::new(NotificationState::default()),
        }
    }

    /// Snapshot of the cross-cycle state.
    pub async fn state(&self) -> NotificationState {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl PriceStore for MemoryStore {
    async fn load_settings(&self) -> Result<Settings, StoreError> {
        Ok(*self.settings.read().await)
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        *self.settings.write().await = *settings;
        Ok(())
    }

    async fn load_cached_series(&self) -> Result<Option<CuratedSeries>, StoreError> {
        Ok(self.state.read().await.last_curated_series.clone())
    }

    async fn save_cached_series(&self, series: &CuratedSeries) -> Result<(), StoreError> {
        self.state.write().await.last_curated_series = Some(series.clone());
        Ok(())
    }

    async fn load_last_now_tier(&self) -> Result<Option<Tier>, StoreError> {
        Ok(self.state.read().await.last_now_tier)
    }

    async fn save_last_now_tier(&self, tier: Tier) -> Result<(), StoreError> {
        self.state.write().await.last_now_tier = Some(tier);
        Ok(())
    }
}
