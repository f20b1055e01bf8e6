//! Read-through repository over a remote source and a local store.

use color_eyre::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::traits::{CacheResult, LocalStore, RemoteSource};
use crate::albums::{Album, ApiAlbum};

/// Repository that serves albums from the local store, refilling it from the
/// remote source when empty.
///
/// Holds no copy of the data between calls: every operation re-reads the
/// store. Remote failures never reach the caller; store failures always do.
pub struct AlbumRepository<R: RemoteSource, S: LocalStore> {
  remote: Arc<R>,
  store: Arc<S>,
}

impl<R: RemoteSource, S: LocalStore> AlbumRepository<R, S> {
  /// Create a repository over already constructed collaborators.
  pub fn new(remote: Arc<R>, store: Arc<S>) -> Self {
    Self { remote, store }
  }

  /// The underlying store.
  pub fn store(&self) -> &S {
    &self.store
  }

  /// Fetch albums with a cache-first strategy.
  ///
  /// 1. Read the store - if non-empty, return it
  /// 2. Otherwise fetch from the remote source and write the result
  /// 3. On remote failure, return whatever the store holds (may be empty)
  ///
  /// A refill returns the mapped payload as delivered. If the payload repeats
  /// an id, both records are returned but the store keeps only the last one.
  pub async fn get_albums(&self) -> Result<CacheResult<Vec<Album>>> {
    let cached = self.store.read_all()?;
    if !cached.is_empty() {
      debug!(count = cached.len(), "serving albums from cache");
      return Ok(CacheResult::from_cache(cached));
    }

    match self.remote.fetch_albums().await {
      Ok(remote) => {
        let albums = self.store_remote(remote)?;
        info!(count = albums.len(), "filled empty cache from remote");
        Ok(CacheResult::from_network(albums))
      }
      Err(e) => {
        warn!(error = %e, "remote fetch failed, falling back to local store");
        let local = self.store.read_all()?;
        Ok(CacheResult::offline(local))
      }
    }
  }

  /// Fetch albums from the remote source regardless of the store's contents.
  ///
  /// On remote failure the result is empty; stale local data is never served
  /// from this path.
  pub async fn get_albums_from_api(&self) -> Result<CacheResult<Vec<Album>>> {
    match self.remote.fetch_albums().await {
      Ok(remote) => {
        let albums = self.store_remote(remote)?;
        info!(count = albums.len(), "refreshed albums from remote");
        Ok(CacheResult::from_network(albums))
      }
      Err(e) => {
        warn!(error = %e, "forced refresh failed");
        Ok(CacheResult::unavailable())
      }
    }
  }

  /// Look up a single album in the store. Never touches the network.
  pub async fn get_album_by_id(&self, id: i64) -> Result<Option<Album>> {
    self.store.find_by_id(id)
  }

  /// Map wire records and write them in one bulk upsert.
  fn store_remote(&self, remote: Vec<ApiAlbum>) -> Result<Vec<Album>> {
    let albums: Vec<Album> = remote.into_iter().map(ApiAlbum::into_album).collect();
    self.store.upsert_all(&albums)?;
    Ok(albums)
  }
}

impl<R: RemoteSource, S: LocalStore> Clone for AlbumRepository<R, S> {
  fn clone(&self) -> Self {
    Self {
      remote: Arc::clone(&self.remote),
      store: Arc::clone(&self.store),
    }
  }
}
