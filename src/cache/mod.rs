//! Read-through cache for the album collection.
//!
//! This module provides:
//! - The collaborator traits the repository consumes (`RemoteSource`, `LocalStore`)
//! - A SQLite-backed `LocalStore`
//! - `AlbumRepository`, which serves from the store when populated, refills it
//!   from the remote source when empty, and falls back to local data when the
//!   network is unavailable

mod layer;
mod storage;
#[cfg(test)]
pub mod testing;
mod traits;

pub use layer::AlbumRepository;
pub use storage::SqliteStore;
pub use traits::{CacheResult, CacheSource, LocalStore, RemoteSource};
