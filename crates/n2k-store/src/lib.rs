//! Backend-agnostic key-value storage for the n2k avatar name resolver.
//!
//! This crate presents one uniform point-store interface over three
//! interchangeable embedded engines. The engine is selected once at process
//! start through [`StoreConfig`] and never changes for the process lifetime.
//!
//! # Storage Backends
//!
//! All backends implement the [`KvStore`] trait:
//!
//! - [`SledStore`] — log-structured embedded store; the only backend with a
//!   genuine in-memory mode
//! - [`RedbStore`] — embedded B-tree store with discard-on-drop write
//!   transactions
//! - [`RocksStore`] — sorted on-disk store with explicit write batches
//!
//! # Design Rules
//!
//! 1. One capability interface, three implementations; the concrete engine
//!    is chosen by [`open_store`], never by runtime type inspection.
//! 2. Handles are scoped: a store opened for one operation is dropped
//!    (closed) on every exit path. Only a bulk import holds a handle open
//!    across records.
//! 3. A [`KvBatch`] dropped without `commit` leaves no partial state in any
//!    backend. A committed batch is atomic and durable.
//! 4. The store never interprets values; it is a pure byte-keyed store.

pub mod config;
pub mod error;
pub mod factory;
pub mod redb_backend;
pub mod rocks_backend;
pub mod sled_backend;
pub mod traits;

pub use config::{BackendKind, StoreConfig, UnknownBackend};
pub use error::{StoreError, StoreResult};
pub use factory::open_store;
pub use redb_backend::RedbStore;
pub use rocks_backend::RocksStore;
pub use sled_backend::SledStore;
pub use traits::{KvBatch, KvStore};

/// File/directory name each backend creates under the configured directory.
pub const DB_NAME: &str = "n2k-database.db";
