use std::path::Path;

use crate::error::{StoreError, StoreResult};
use crate::traits::{KvBatch, KvStore};
use crate::DB_NAME;

/// Log-structured embedded store.
///
/// The only backend that honors `in_memory`: a temporary tree that never
/// touches disk, useful on hosts where the mapping fits in RAM. Batches are
/// applied atomically with `apply_batch` and flushed before the commit call
/// returns.
#[derive(Debug)]
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open the store under `dir`, or a temporary in-memory tree.
    pub fn open(dir: &Path, in_memory: bool) -> StoreResult<Self> {
        let config = if in_memory {
            sled::Config::new().temporary(true)
        } else {
            sled::Config::new().path(dir.join(DB_NAME))
        };
        let db = config.open().map_err(|e| StoreError::Open {
            backend: "sled",
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { db })
    }
}

impl KvStore for SledStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.db.insert(key, value)?;
        self.db.flush()?;
        Ok(())
    }

    fn batch(&self) -> StoreResult<Box<dyn KvBatch + '_>> {
        Ok(Box::new(SledBatch {
            tree: self.db.clone(),
            pending: sled::Batch::default(),
        }))
    }

    fn maintain(&self) -> StoreResult<()> {
        self.db.flush()?;
        Ok(())
    }
}

/// Pending writes destined for one atomic `apply_batch`.
struct SledBatch {
    tree: sled::Db,
    pending: sled::Batch,
}

impl KvBatch for SledBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.pending.insert(key, value);
        Ok(())
    }

    fn commit(self: Box<Self>) -> StoreResult<()> {
        self.tree.apply_batch(self.pending)?;
        self.tree.flush()?;
        Ok(())
    }
}
