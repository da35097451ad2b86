//! JSON file store: `settings.json` and `state.json` in one directory.
//!
//! Every write goes to a temp file that is then renamed over the target, so a
//! cycle interrupted mid-write leaves the previous file intact.

use super::{NotificationState, PriceStore, Settings};
use crate::domain::curation::CuratedSeries;
use crate::error::StoreError;
use crate::shared::Tier;
use async_lock::Mutex;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";
const STATE_FILE: &str = "state.json";

/// Settings and state as JSON files in one directory.
///
/// File access uses blocking `std::fs` calls, which block the executor thread
/// for the duration of each load or save.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    /// Serializes read-modify-write of `state.json`.
    state_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store rooted at `dir`, created if missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            state_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn read<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, StoreError> {
        match fs::read(self.path(name)) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let target = self.path(name);
        let tmp = self.path(&format!("{name}.tmp"));
        let bytes = serde_json::to_vec_pretty(value)?;
        {
            let mut file = File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    async fn update_state(
        &self,
        f: impl FnOnce(&mut NotificationState) + Send,
    ) -> Result<(), StoreError> {
        let _guard = self.state_lock.lock().await;
        // An unreadable state file is replaced rather than blocking every save.
        let mut state: NotificationState = match self.read(STATE_FILE) {
            Err(StoreError::Serde(e)) => {
                tracing::warn!(error = %e, "Discarding unreadable state file");
                NotificationState::default()
            }
            other => other?,
        };
        f(&mut state);
        self.write(STATE_FILE, &state)
    }
}

#[async_trait]
impl PriceStore for JsonFileStore {
    async fn load_settings(&self) -> Result<Settings, StoreError> {
        self.read(SETTINGS_FILE)
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.write(SETTINGS_FILE, settings)
    }

    async fn load_cached_series(&self) -> Result<Option<CuratedSeries>, StoreError> {
        let state: NotificationState = self.read(STATE_FILE)?;
        Ok(state.last_curated_series)
    }

    async fn save_cached_series(&self, series: &CuratedSeries) -> Result<(), StoreError> {
        let series = series.clone();
        self.update_state(move |state| state.last_curated_series = Some(series))
            .await
    }

    async fn load_last_now_tier(&self) -> Result<Option<Tier>, StoreError> {
        let state: NotificationState = self.read(STATE_FILE)?;
        Ok(state.last_now_tier)
    }

    async fn save_last_now_tier(&self, tier: Tier) -> Result<(), StoreError> {
        self.update_state(move |state| state.last_now_tier = Some(tier))
            .await
    }
}
