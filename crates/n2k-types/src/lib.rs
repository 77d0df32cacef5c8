//! Foundation types for the n2k avatar name resolver.
//!
//! This crate provides the record model shared by every other n2k crate:
//! the serialized unit stored per avatar, the null-key sentinel, and the
//! shape check callers use to decide whether an input looks like a key.
//!
//! # Key Types
//!
//! - [`AvatarRecord`] — the name/key/grid triple stored under both lookup keys
//! - [`NULL_KEY`] — the all-zero key used as the not-found sentinel
//! - [`is_valid_key`] — shape-only validation for the 36-character key form

pub mod key;
pub mod record;

pub use key::{is_valid_key, KEY_LEN};
pub use record::{AvatarRecord, NULL_KEY};
