//! Substitutable collaborators for repository tests.

use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use super::traits::{LocalStore, RemoteSource};
use crate::albums::{Album, ApiAlbum};

pub fn album(id: i64, title: &str) -> Album {
  Album {
    id,
    group_id: id,
    title: title.to_string(),
    image_url: format!("url{}", id),
    thumbnail_url: format!("thumb{}", id),
  }
}

/// Remote source serving a fixed payload, or failing on demand.
pub struct FakeRemote {
  albums: Mutex<Vec<ApiAlbum>>,
  fail: AtomicBool,
  calls: AtomicUsize,
}

impl FakeRemote {
  pub fn new(albums: Vec<Album>) -> Self {
    Self {
      albums: Mutex::new(albums.iter().map(Album::to_api).collect()),
      fail: AtomicBool::new(false),
      calls: AtomicUsize::new(0),
    }
  }

  pub fn failing() -> Self {
    let remote = Self::new(Vec::new());
    remote.set_failing(true);
    remote
  }

  pub fn set_albums(&self, albums: Vec<Album>) {
    *self.albums.lock().unwrap() = albums.iter().map(Album::to_api).collect();
  }

  pub fn set_failing(&self, fail: bool) {
    self.fail.store(fail, Ordering::SeqCst);
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl RemoteSource for FakeRemote {
  async fn fetch_albums(&self) -> Result<Vec<ApiAlbum>> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.fail.load(Ordering::SeqCst) {
      return Err(eyre!("Simulated API error"));
    }
    Ok(self.albums.lock().unwrap().clone())
  }
}

/// In-memory store keyed by id, with call counters and failure injection.
#[derive(Default)]
pub struct MemoryStore {
  albums: Mutex<BTreeMap<i64, Album>>,
  fail: AtomicBool,
  reads: AtomicUsize,
  writes: AtomicUsize,
}

impl MemoryStore {
  pub fn with(albums: Vec<Album>) -> Self {
    let store = Self::default();
    store
      .albums
      .lock()
      .unwrap()
      .extend(albums.into_iter().map(|a| (a.id, a)));
    store
  }

  pub fn set_failing(&self, fail: bool) {
    self.fail.store(fail, Ordering::SeqCst);
  }

  pub fn reads(&self) -> usize {
    self.reads.load(Ordering::SeqCst)
  }

  pub fn writes(&self) -> usize {
    self.writes.load(Ordering::SeqCst)
  }

  fn check(&self) -> Result<()> {
    if self.fail.load(Ordering::SeqCst) {
      return Err(eyre!("Simulated storage error"));
    }
    Ok(())
  }
}

impl LocalStore for MemoryStore {
  fn read_all(&self) -> Result<Vec<Album>> {
    self.reads.fetch_add(1, Ordering::SeqCst);
    self.check()?;
    Ok(self.albums.lock().unwrap().values().cloned().collect())
  }

  fn upsert_all(&self, albums: &[Album]) -> Result<()> {
    self.writes.fetch_add(1, Ordering::SeqCst);
    self.check()?;
    let mut stored = self.albums.lock().unwrap();
    for album in albums {
      stored.insert(album.id, album.clone());
    }
    Ok(())
  }

  fn find_by_id(&self, id: i64) -> Result<Option<Album>> {
    self.check()?;
    Ok(self.albums.lock().unwrap().get(&id).cloned())
  }
}
