//! Durable key-value store behind the screening cache.
//!
//! The cache never touches ambient global state: it is handed a
//! [`KeyValueStore`] and reads/writes one string value per key.
//!
//! ## Backends
//!
//! - **MemoryStore**: `HashMap` behind a mutex, lives as long as the process
//! - **SqliteStore**: single `kv` table in a SQLite file

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::sync::Arc;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use crate::types::config::{StoreBackend, StoreConfig};
use crate::{ScreenerError, ScreenerResult};

/// Synchronous string-keyed, string-valued store.
///
/// `set` replaces the whole value for a key in one step; readers never see a
/// partially written value.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> ScreenerResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> ScreenerResult<()>;
}

/// Opens the store selected by the configuration.
pub fn open_store(config: &StoreConfig) -> ScreenerResult<Arc<dyn KeyValueStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "sqlite")]
        StoreBackend::Sqlite => {
            if let Some(parent) = config.path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                    tracing::debug!("Store directory created: {}", parent.display());
                }
            }
            Ok(Arc::new(SqliteStore::open(&config.path)?))
        }
        #[cfg(not(feature = "sqlite"))]
        StoreBackend::Sqlite => Err(ScreenerError::config(
            "sqlite store requested but the 'sqlite' feature is disabled",
        )),
    }
}

pub(crate) fn poisoned(what: &str) -> ScreenerError {
    ScreenerError::Store(format!("{what} lock poisoned"))
}
