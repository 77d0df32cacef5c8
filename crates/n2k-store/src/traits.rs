use crate::error::StoreResult;

/// Uniform point-store interface over the embedded engines.
///
/// All implementations must satisfy these invariants:
/// - `get` and `put` are single point operations; the store never scans.
/// - A value written by `put` or a committed batch is durable once the call
///   returns.
/// - Writing an existing key overwrites it (last-write-wins); the store
///   never merges.
/// - Dropping the store closes the underlying handle; there is no separate
///   close call.
pub trait KvStore: Send + Sync + std::fmt::Debug {
    /// Point read. Returns `Ok(None)` if the key is absent.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Point write of a single key.
    fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Begin a write batch.
    ///
    /// Puts staged into the batch become observable only when `commit`
    /// succeeds; a batch dropped without committing leaves the store
    /// untouched. Writes apply in staging order.
    fn batch(&self) -> StoreResult<Box<dyn KvBatch + '_>>;

    /// Housekeeping hint called between bulk-import blocks: flush,
    /// compaction, or whatever else the engine benefits from.
    /// Implementations may make this a no-op.
    fn maintain(&self) -> StoreResult<()>;
}

/// A set of writes that commits atomically.
pub trait KvBatch {
    /// Stage a write. For some engines this already runs inside an open
    /// transaction; for others it buffers until `commit`.
    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Atomically apply every staged write. Consumes the batch; on error
    /// none of the staged writes are observable.
    fn commit(self: Box<Self>) -> StoreResult<()>;
}
