use std::time::Instant;

use tracing::{debug, error};

use n2k_store::{open_store, StoreConfig};
use n2k_types::AvatarRecord;

use crate::error::{ResolverError, ResolverResult};

/// Single entry point for point lookups and administrative inserts.
///
/// Holds only the store configuration. Every operation opens the store,
/// does its point reads/writes, and drops the handle on the way out; the
/// resolver never keeps a handle open across independent calls.
#[derive(Clone, Debug)]
pub struct Resolver {
    config: StoreConfig,
}

impl Resolver {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Resolve `input` (name or key, trimmed of surrounding whitespace)
    /// to the full record with exactly one point read.
    ///
    /// Returns the not-found sentinel uniformly for an absent key, a value
    /// that fails to decode, or a backend error; callers cannot tell these
    /// apart from the return value alone.
    pub fn lookup(&self, input: &str) -> AvatarRecord {
        let needle = input.trim();
        let started = Instant::now();
        let record = match self.try_lookup(needle) {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(input = needle, "not present in store");
                AvatarRecord::not_found()
            }
            Err(e) => {
                error!(input = needle, error = %e, "lookup failed");
                AvatarRecord::not_found()
            }
        };
        debug!(input = needle, elapsed = ?started.elapsed(), "lookup");
        record
    }

    /// Projection of [`lookup`](Self::lookup) for name inputs: `(key, grid)`.
    pub fn lookup_by_name(&self, name: &str) -> (String, String) {
        let record = self.lookup(name);
        (record.key, record.grid)
    }

    /// Projection of [`lookup`](Self::lookup) for key inputs: `(name, grid)`.
    pub fn lookup_by_key(&self, key: &str) -> (String, String) {
        let record = self.lookup(key);
        (record.avatar_name, record.grid)
    }

    /// Write one record under both of its keys in a single batch.
    ///
    /// The dual-index invariant is established here: both puts ride the same
    /// batch, so a commit failure leaves neither key written.
    pub fn insert(&self, name: &str, key: &str, grid: &str) -> ResolverResult<()> {
        let record = AvatarRecord::new(name, key, grid);
        let json = record
            .to_json()
            .map_err(|e| ResolverError::Encode(e.to_string()))?;

        let store = open_store(&self.config)?;
        let mut batch = store.batch()?;
        batch.put(name.as_bytes(), &json)?;
        batch.put(key.as_bytes(), &json)?;
        batch.commit()?;

        debug!(name, key, grid, "inserted record under both keys");
        Ok(())
    }

    fn try_lookup(&self, needle: &str) -> ResolverResult<Option<AvatarRecord>> {
        let store = open_store(&self.config)?;
        let Some(bytes) = store.get(needle.as_bytes())? else {
            return Ok(None);
        };
        let record = AvatarRecord::from_json(&bytes)
            .map_err(|e| ResolverError::Decode(e.to_string()))?;
        Ok(Some(record))
    }
}
