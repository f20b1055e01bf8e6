//! Subcommand implementations and output formatting

use color_eyre::{eyre::eyre, Result};
use std::sync::Arc;
use tracing::warn;

use crate::albums::{Album, AlbumClient};
use crate::cache::{AlbumRepository, CacheResult, CacheSource, LocalStore, SqliteStore};
use crate::config::Config;
use crate::event::{EventHandler, RefreshTrigger};

pub type Repository = AlbumRepository<AlbumClient, SqliteStore>;

/// Build the repository from configuration.
pub fn open_repository(config: &Config) -> Result<Repository> {
  let client = AlbumClient::new(&config.api)?;
  let store = SqliteStore::open(config.storage.path.as_deref())?;
  Ok(AlbumRepository::new(Arc::new(client), Arc::new(store)))
}

/// `list`: cached albums, or a forced refresh with `refresh`.
pub async fn list(repo: &Repository, refresh: bool, json: bool) -> Result<()> {
  let result = if refresh {
    repo.get_albums_from_api().await?
  } else {
    repo.get_albums().await?
  };

  if json {
    println!("{}", serde_json::to_string_pretty(&result.data)?);
  } else {
    print!("{}", format_list(&result));
  }
  Ok(())
}

/// `show`: a single cached album.
pub async fn show(repo: &Repository, id: i64, json: bool) -> Result<()> {
  let album = repo
    .get_album_by_id(id)
    .await?
    .ok_or_else(|| eyre!("Album {} not found", id))?;

  if json {
    println!("{}", serde_json::to_string_pretty(&album)?);
  } else {
    print!("{}", format_detail(&album));
  }
  Ok(())
}

/// `status`: what the cache currently holds.
pub fn status(repo: &Repository) -> Result<()> {
  let store = repo.store();
  let count = store.read_all()?.len();
  let refreshed = store
    .last_written_at()?
    .map(|t| t.to_rfc3339())
    .unwrap_or_else(|| "never".to_string());

  println!("cached albums: {}", count);
  println!("last refresh:  {}", refreshed);
  Ok(())
}

/// `watch`: load once, then refresh whenever the network comes back.
pub async fn watch(repo: &Repository, config: &Config) -> Result<()> {
  let initial = repo.get_albums().await?;
  println!(
    "{} albums ({}), watching for reconnects",
    initial.data.len(),
    initial.source
  );

  let feed = config.api.feed_addr()?;
  let mut events = EventHandler::new();
  events.spawn_connectivity_probe(feed, config.watch.probe_interval());

  let trigger = RefreshTrigger::new(config.watch.debounce());
  let refresh = || {
    let repo = repo.clone();
    async move {
      match repo.get_albums_from_api().await {
        Ok(result) => println!("{} albums ({})", result.data.len(), result.source),
        Err(e) => warn!(error = %e, "refresh failed"),
      }
    }
  };

  tokio::select! {
    _ = trigger.run(&mut events, refresh) => {}
    _ = tokio::signal::ctrl_c() => {}
  }
  Ok(())
}

fn format_list(result: &CacheResult<Vec<Album>>) -> String {
  let mut out = String::new();
  for album in &result.data {
    out.push_str(&format!("{:>6}  {:>4}  {}\n", album.id, album.group_id, album.title));
  }

  let note = match result.source {
    CacheSource::Cache => "from cache",
    CacheSource::Network => "from network",
    CacheSource::Offline => "offline, showing cached data",
    CacheSource::Unavailable => "refresh failed",
  };
  out.push_str(&format!("{} albums ({})\n", result.data.len(), note));
  out
}

fn format_detail(album: &Album) -> String {
  format!(
    "id:        {}\ngroup:     {}\ntitle:     {}\nimage:     {}\nthumbnail: {}\n",
    album.id, album.group_id, album.title, album.image_url, album.thumbnail_url
  )
}
