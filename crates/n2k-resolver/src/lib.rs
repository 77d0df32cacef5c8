//! Point-lookup and insert service for the n2k avatar name resolver.
//!
//! A [`Resolver`] turns a single input string (avatar name or avatar key,
//! the caller need not say which) into the complete stored record with one
//! point read. That works because every insert writes the identical record
//! under both keys; see the `n2k-store` crate docs.
//!
//! Lookups never fail from the caller's point of view: an absent key, an
//! undecodable value, and a backend hiccup all come back as the same
//! not-found sentinel record (each is logged distinctly for diagnosis).

pub mod error;
pub mod resolver;

pub use error::{ResolverError, ResolverResult};
pub use resolver::Resolver;
