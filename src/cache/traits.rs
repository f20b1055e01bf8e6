//! Collaborator traits and result types for the album cache.

use async_trait::async_trait;
use color_eyre::Result;

use crate::albums::{Album, ApiAlbum};

/// Source of truth for the album collection, usually a network endpoint.
///
/// Every failure (transport, status, payload) is reported through the same
/// error; callers do not inspect its kind.
#[async_trait]
pub trait RemoteSource: Send + Sync {
  /// Fetch the full collection. All-or-nothing, no pagination.
  async fn fetch_albums(&self) -> Result<Vec<ApiAlbum>>;
}

/// Persistent store for the album collection.
pub trait LocalStore: Send + Sync {
  /// Every stored album, in no particular order.
  fn read_all(&self) -> Result<Vec<Album>>;

  /// Insert or replace by `id`. Must be idempotent.
  fn upsert_all(&self, albums: &[Album]) -> Result<()>;

  /// Look up a single album.
  fn find_by_id(&self, id: i64) -> Result<Option<Album>>;
}

/// Result from a cache operation, including data and metadata about the source.
#[derive(Debug, Clone)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
}

impl<T> CacheResult<T> {
  /// Fresh data from the remote source, already written to the store.
  pub fn from_network(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Network,
    }
  }

  /// Data served from a populated store.
  pub fn from_cache(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Cache,
    }
  }

  /// Remote fetch failed, serving whatever the store holds.
  pub fn offline(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Offline,
    }
  }
}

impl<T: Default> CacheResult<T> {
  /// Forced refresh failed; nothing is served.
  pub fn unavailable() -> Self {
    Self {
      data: T::default(),
      source: CacheSource::Unavailable,
    }
  }
}

/// Indicates where returned data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Fresh data from network
  Network,
  /// Local store was populated, no network call made
  Cache,
  /// Network unavailable, serving local data (possibly empty)
  Offline,
  /// Forced refresh failed, empty result
  Unavailable,
}

impl std::fmt::Display for CacheSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Self::Network => "network",
      Self::Cache => "cache",
      Self::Offline => "offline",
      Self::Unavailable => "unavailable",
    };
    f.write_str(s)
  }
}
