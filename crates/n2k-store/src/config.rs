use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three interchangeable storage engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Log-structured embedded store (supports an in-memory mode).
    Sled,
    /// Embedded B-tree store.
    Redb,
    /// Sorted on-disk store.
    Rocksdb,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sled => write!(f, "sled"),
            Self::Redb => write!(f, "redb"),
            Self::Rocksdb => write!(f, "rocksdb"),
        }
    }
}

/// Parse error for [`BackendKind`].
#[derive(Debug, thiserror::Error)]
#[error("unknown backend {0:?} (expected sled, redb, or rocksdb)")]
pub struct UnknownBackend(String);

impl FromStr for BackendKind {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sled" => Ok(Self::Sled),
            "redb" => Ok(Self::Redb),
            "rocksdb" => Ok(Self::Rocksdb),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}

/// Process-lifetime storage selection: which engine, where on disk, and
/// whether to skip disk entirely (sled only).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The engine to open.
    pub backend: BackendKind,
    /// Directory the engine stores its files under.
    pub dir: PathBuf,
    /// Keep everything in memory. Only honored by the sled backend; the
    /// others fail at open time.
    #[serde(default)]
    pub in_memory: bool,
}

impl StoreConfig {
    /// On-disk configuration for the given backend and directory.
    pub fn new(backend: BackendKind, dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            dir: dir.into(),
            in_memory: false,
        }
    }

    /// In-memory sled configuration, for tests and ephemeral use.
    pub fn in_memory() -> Self {
        Self {
            backend: BackendKind::Sled,
            dir: PathBuf::new(),
            in_memory: true,
        }
    }
}
