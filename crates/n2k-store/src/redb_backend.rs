use std::path::Path;

use redb::{Database, TableDefinition, WriteTransaction};

use crate::error::{StoreError, StoreResult};
use crate::traits::{KvBatch, KvStore};
use crate::DB_NAME;

/// All records live in one table; the dual index is two keys, not two tables.
const TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("avatars");

/// Embedded B-tree store.
///
/// Every write runs inside an owned write transaction. A transaction that is
/// dropped without committing (including on panic) is rolled back by the
/// engine, so a batch never leaves partial state behind.
#[derive(Debug)]
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open (or create) the database file under `dir`. In-memory mode is
    /// rejected here; only the sled backend offers it.
    pub fn open(dir: &Path, in_memory: bool) -> StoreResult<Self> {
        if in_memory {
            return Err(StoreError::MemoryUnsupported("redb"));
        }
        let db = Database::create(dir.join(DB_NAME)).map_err(|e| StoreError::Open {
            backend: "redb",
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self { db })
    }
}

impl KvStore for RedbStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let txn = self.db.begin_read()?;
        let table = match txn.open_table(TABLE) {
            Ok(table) => table,
            // A store nothing has been written to yet has no table.
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn batch(&self) -> StoreResult<Box<dyn KvBatch + '_>> {
        Ok(Box::new(RedbBatch {
            txn: self.db.begin_write()?,
        }))
    }

    fn maintain(&self) -> StoreResult<()> {
        // redb reclaims space inside its own transactions; nothing to hint.
        Ok(())
    }
}

/// An open write transaction; writes land in it directly and become
/// observable only on commit.
struct RedbBatch {
    txn: WriteTransaction,
}

impl KvBatch for RedbBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        let mut table = self.txn.open_table(TABLE)?;
        table.insert(key, value)?;
        Ok(())
    }

    fn commit(self: Box<Self>) -> StoreResult<()> {
        self.txn.commit()?;
        Ok(())
    }
}
