use crate::auth::AuthService;
use crate::clients::{AccountClient, ProductClient};
use crate::clock::{SharedClock, SystemClock};
use crate::config::Config;
use crate::i18n::{Language, Translator};
use crate::model::{Account, Product};
use crate::settings::{SettingsError, SettingsStore};
use crate::storage::{keys, KvSnapshot, KvStore, StorageError};
use resource_actor::FrameworkError;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Could not open data directory: {0}")]
    Storage(#[from] StorageError),

    #[error("Could not load settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Could not load {collection}: {source}")]
    Snapshot {
        collection: &'static str,
        source: FrameworkError,
    },

    #[error("Actor task failed: {0}")]
    ActorTask(String),
}

/// The running application: both resource actors plus the services built on them.
///
/// # Architecture
///
/// - **Product Actor**: the inventory, persisted under `inventory_products`
/// - **Account Actor**: registered shop owners, persisted under `all_users`
/// - **AuthService**: session handling on top of the account client
/// - **SettingsStore**: the shared classifier thresholds
///
/// Product actions read time from the injected clock (`SystemClock` in
/// production), so tests can drive staleness without sleeping.
///
/// # Example
///
/// ```ignore
/// let system = InventorySystem::start(&Config::new("/tmp/shop"))?;
/// let id = system.product_client.add_product("Sugar").await?;
/// system.product_client.increment(id).await?;
/// system.shutdown().await?;
/// ```
pub struct InventorySystem {
    pub product_client: ProductClient,
    pub account_client: AccountClient,
    pub auth: AuthService,
    pub settings: SettingsStore,
    pub store: KvStore,
    pub clock: SharedClock,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl InventorySystem {
    /// Opens the data directory from `config` and starts every actor against it.
    pub fn start(config: &Config) -> Result<Self, SystemError> {
        let store = KvStore::open(&config.data_dir)?;
        Self::with_store(store, Arc::new(SystemClock), config.buffer_size)
    }

    /// Starts against an existing store and clock.
    ///
    /// 1. Creates both actors and loads their snapshots from `store`
    /// 2. Spawns each actor in its own Tokio task with its context
    /// 3. Builds the services that sit on top of the clients
    pub fn with_store(
        store: KvStore,
        clock: SharedClock,
        buffer_size: usize,
    ) -> Result<Self, SystemError> {
        let (product_actor, product_client) = crate::product_actor::new(buffer_size);
        let product_actor = product_actor
            .with_snapshot(KvSnapshot::<Product>::new(store.clone(), keys::PRODUCTS))
            .map_err(|source| SystemError::Snapshot {
                collection: keys::PRODUCTS,
                source,
            })?;

        let (account_actor, account_client) = crate::account_actor::new(buffer_size);
        let account_actor = account_actor
            .with_snapshot(KvSnapshot::<Account>::new(store.clone(), keys::ACCOUNTS))
            .map_err(|source| SystemError::Snapshot {
                collection: keys::ACCOUNTS,
                source,
            })?;

        let settings = SettingsStore::load(store.clone())?;

        // Products need the clock; accounts need nothing (Context = ())
        let product_handle = tokio::spawn(product_actor.run(clock.clone()));
        let account_handle = tokio::spawn(account_actor.run(()));

        let auth = AuthService::new(account_client.clone(), store.clone());
        info!("Inventory system started");

        Ok(Self {
            product_client,
            account_client,
            auth,
            settings,
            store,
            clock,
            handles: vec![product_handle, account_handle],
        })
    }

    /// A throwaway system with nothing on disk.
    pub fn in_memory(clock: SharedClock) -> Result<Self, SystemError> {
        Self::with_store(KvStore::in_memory(), clock, crate::config::DEFAULT_BUFFER_SIZE)
    }

    /// Translator for the persisted language.
    pub fn translator(&self) -> Result<Translator, SystemError> {
        Ok(Translator::new(Language::load(&self.store)?))
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping every client closes the actors' channels; each actor then leaves
    /// its loop and the task finishes. Returns an error if any actor task panicked.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        // The auth service holds an account client clone; it must go too.
        drop(self.auth);
        drop(self.product_client);
        drop(self.account_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorTask(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
