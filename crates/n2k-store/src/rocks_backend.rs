use std::path::Path;

use rocksdb::{Options, WriteBatch, DB};

use crate::error::{StoreError, StoreResult};
use crate::traits::{KvBatch, KvStore};
use crate::DB_NAME;

/// Sorted on-disk store.
///
/// Writes accumulate in an explicit [`WriteBatch`] and are applied in one
/// atomic `write` call. `maintain` issues a full-range compaction hint,
/// which matters after the large sequential ingest of a bulk import.
#[derive(Debug)]
pub struct RocksStore {
    db: DB,
}

impl RocksStore {
    /// Open (or create) the database under `dir`. In-memory mode is
    /// rejected here; only the sled backend offers it.
    pub fn open(dir: &Path, in_memory: bool) -> StoreResult<Self> {
        if in_memory {
            return Err(StoreError::MemoryUnsupported("rocksdb"));
        }
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, dir.join(DB_NAME)).map_err(|e| StoreError::Open {
            backend: "rocksdb",
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { db })
    }
}

impl KvStore for RocksStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.db.get(key)?)
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.db.put(key, value)?;
        Ok(())
    }

    fn batch(&self) -> StoreResult<Box<dyn KvBatch + '_>> {
        Ok(Box::new(RocksBatch {
            db: &self.db,
            pending: WriteBatch::default(),
        }))
    }

    fn maintain(&self) -> StoreResult<()> {
        self.db.compact_range(None::<&[u8]>, None::<&[u8]>);
        Ok(())
    }
}

/// Buffered writes applied atomically on commit.
struct RocksBatch<'a> {
    db: &'a DB,
    pending: WriteBatch,
}

impl KvBatch for RocksBatch<'_> {
    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.pending.put(key, value);
        Ok(())
    }

    fn commit(self: Box<Self>) -> StoreResult<()> {
        let RocksBatch { db, pending } = *self;
        db.write(pending)?;
        Ok(())
    }
}
