//! HTTP resolver endpoint for the n2k avatar name resolver.
//!
//! One route, three behaviors, mirroring what in-world scripted callers
//! expect:
//!
//! - `name` only → respond with the avatar's key
//! - `key` only → respond with the avatar's name
//! - both → insert a new record (grid taken from the `X-SecondLife-Shard`
//!   header)
//!
//! Responses are plain text. The default is compatibility mode (bare
//! value); `compat=false` switches to a human-readable sentence. All
//! storage semantics live in `n2k-resolver`; this crate is a thin caller.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use router::build_router;
pub use server::ResolverServer;
