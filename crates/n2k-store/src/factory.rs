use std::fs;

use tracing::debug;

use crate::config::{BackendKind, StoreConfig};
use crate::error::StoreResult;
use crate::redb_backend::RedbStore;
use crate::rocks_backend::RocksStore;
use crate::sled_backend::SledStore;
use crate::traits::KvStore;

/// Open the configured backend.
///
/// Creates the storage directory if it does not exist yet. This is the only
/// place a concrete engine type is named; everything downstream works
/// through `dyn KvStore`. Open failure is fatal for the caller: the
/// process cannot serve without a store.
pub fn open_store(config: &StoreConfig) -> StoreResult<Box<dyn KvStore>> {
    if !config.in_memory {
        fs::create_dir_all(&config.dir)?;
    }
    debug!(backend = %config.backend, dir = %config.dir.display(), in_memory = config.in_memory, "opening store");
    match config.backend {
        BackendKind::Sled => {
            SledStore::open(&config.dir, config.in_memory).map(|s| Box::new(s) as Box<dyn KvStore>)
        }
        BackendKind::Redb => {
            RedbStore::open(&config.dir, config.in_memory).map(|s| Box::new(s) as Box<dyn KvStore>)
        }
        BackendKind::Rocksdb => {
            RocksStore::open(&config.dir, config.in_memory).map(|s| Box::new(s) as Box<dyn KvStore>)
        }
    }
}
