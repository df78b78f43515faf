//! # Settings Store
//!
//! The single, always-present [`Settings`] record. Reads never touch storage; the
//! current value lives in a `watch` channel so other tasks can subscribe to changes.

use crate::model::{Settings, SettingsUpdate};
use crate::storage::{keys, KvStore, StorageError};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Low-stock percent must be between 0 and 100, got {0}")]
    InvalidLowStockPercent(u8),

    #[error("Settings storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct SettingsStore {
    store: KvStore,
    sender: watch::Sender<Settings>,
}

impl SettingsStore {
    /// Reads the persisted settings, falling back to the defaults (20%, 30 days).
    pub fn load(store: KvStore) -> Result<Self, SettingsError> {
        let settings = store
            .get_item::<Settings>(keys::SETTINGS)?
            .unwrap_or_default();
        debug!(?settings, "Settings loaded");
        let (sender, _) = watch::channel(settings);
        Ok(Self { store, sender })
    }

    pub fn current(&self) -> Settings {
        *self.sender.borrow()
    }

    /// Merges `update` into the current settings, persists and publishes the result.
    ///
    /// Nothing is stored or published when validation fails.
    #[instrument(skip(self))]
    pub fn update(&self, update: SettingsUpdate) -> Result<Settings, SettingsError> {
        if let Some(percent) = update.low_stock_percent {
            if percent > 100 {
                return Err(SettingsError::InvalidLowStockPercent(percent));
            }
        }

        let mut next = self.current();
        if let Some(percent) = update.low_stock_percent {
            next.low_stock_percent = percent;
        }
        if let Some(days) = update.no_change_days {
            next.no_change_days = days;
        }

        self.store.set_item(keys::SETTINGS, &next)?;
        self.sender.send_replace(next);
        info!(?next, "Settings updated");
        Ok(next)
    }

    /// A receiver that sees every later update.
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_stored() {
        let settings = SettingsStore::load(KvStore::in_memory()).unwrap();
        assert_eq!(settings.current(), Settings::default());
        assert_eq!(settings.current().low_stock_percent, 20);
        assert_eq!(settings.current().no_change_days, 30);
    }

    #[test]
    fn test_partial_update_merges_and_persists() {
        let store = KvStore::in_memory();
        let settings = SettingsStore::load(store.clone()).unwrap();

        let updated = settings
            .update(SettingsUpdate {
                no_change_days: Some(0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.low_stock_percent, 20);
        assert_eq!(updated.no_change_days, 0);

        let reloaded = SettingsStore::load(store).unwrap();
        assert_eq!(reloaded.current(), updated);
    }

    #[test]
    fn test_out_of_range_percent_is_rejected_without_side_effects() {
        let store = KvStore::in_memory();
        let settings = SettingsStore::load(store.clone()).unwrap();

        let err = settings
            .update(SettingsUpdate {
                low_stock_percent: Some(101),
                no_change_days: Some(5),
            })
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidLowStockPercent(101)));
        assert_eq!(settings.current(), Settings::default());
        assert_eq!(store.get_item::<Settings>(keys::SETTINGS).unwrap(), None);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let settings = SettingsStore::load(KvStore::in_memory()).unwrap();
        let mut rx = settings.subscribe();

        settings
            .update(SettingsUpdate {
                low_stock_percent: Some(50),
                ..Default::default()
            })
            .unwrap();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().low_stock_percent, 50);
    }
}
