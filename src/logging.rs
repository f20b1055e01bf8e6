//! File logging setup.
//!
//! Logs go to a daily rolling file so stdout stays reserved for command output.

use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "albums.log";
const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. The returned guard flushes the
/// writer on drop and must be held for the life of the process.
pub fn init(level: Option<&str>) -> Result<WorkerGuard> {
  let dir = log_dir()?;
  std::fs::create_dir_all(&dir).map_err(|e| eyre!("Failed to create log directory: {}", e))?;

  let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
  let (writer, guard) = tracing_appender::non_blocking(appender);

  tracing_subscriber::fmt()
    .with_env_filter(filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), level)?)
    .with_writer(writer)
    .with_ansi(false)
    .try_init()
    .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

  Ok(guard)
}

/// Build the filter from the `RUST_LOG` value if it parses, else from `level`.
fn filter(env: Option<&str>, level: Option<&str>) -> Result<EnvFilter> {
  if let Some(filter) = env.and_then(|value| EnvFilter::try_new(value).ok()) {
    return Ok(filter);
  }

  let directive = level.unwrap_or(DEFAULT_FILTER);
  EnvFilter::try_new(directive).map_err(|e| eyre!("Invalid log level {:?}: {}", directive, e))
}

fn log_dir() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("albums").join("logs"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_filter_accepts_directives() {
    assert_eq!(filter(None, Some("debug")).unwrap().to_string(), "debug");
    assert!(filter(None, Some("albums=trace,reqwest=warn")).is_ok());
    assert_eq!(filter(None, None).unwrap().to_string(), DEFAULT_FILTER);
  }

  #[test]
  fn test_filter_rejects_garbage() {
    assert!(filter(None, Some("albums=notalevel")).is_err());
  }

  #[test]
  fn test_env_value_wins_over_level() {
    let filter = filter(Some("warn"), Some("debug")).unwrap();
    assert_eq!(filter.to_string(), "warn");
  }

  #[test]
  fn test_unparseable_env_value_falls_back_to_level() {
    let filter = filter(Some("albums=notalevel"), Some("debug")).unwrap();
    assert_eq!(filter.to_string(), "debug");
  }
}
