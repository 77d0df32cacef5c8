//! Batched CSV bulk-import pipeline for the n2k avatar name resolver.
//!
//! Loads a vendor-supplied two-column export (`key,avatar_name`) into the
//! store, writing each record under both its name key and its avatar key so
//! that either direction resolves with a single point read.
//!
//! The input file may be plain CSV or a gzip/bzip2 archive of one; the
//! pipeline classifies it by file signature. Uploaded exports are routinely
//! renamed, so the extension is never consulted.
//!
//! # Entry Points
//!
//! - [`import_path`] — open the configured store, sniff the file, stream it
//! - [`import_into`] — the core loop over an already-open store and reader

pub mod error;
pub mod pipeline;
pub mod sniff;

pub use error::{ImportError, ImportResult};
pub use pipeline::{import_into, import_path, ImportOptions, ImportSummary};
pub use sniff::{open_detected, Compression, SNIFF_LEN};
