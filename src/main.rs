mod albums;
mod cache;
mod commands;
mod config;
mod db;
mod event;
mod logging;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "albums")]
#[command(about = "Browse albums from a remote feed, cached for offline use")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/albums/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Log filter, e.g. "debug" or "albums=trace" (RUST_LOG wins)
  #[arg(long, global = true)]
  log_level: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List albums, serving from the cache when it is populated
  List {
    /// Always fetch from the network; prints nothing cached on failure
    #[arg(short, long)]
    refresh: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
  },
  /// Show a single cached album
  Show {
    id: i64,

    #[arg(long)]
    json: bool,
  },
  /// Show cache size and last refresh time
  Status,
  /// Refresh automatically whenever the network comes back
  Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?;

  let level = args.log_level.as_deref().or(config.log_level.as_deref());
  let _log_guard = logging::init(level)?;

  let repo = commands::open_repository(&config)?;

  match args.command {
    Command::List { refresh, json } => commands::list(&repo, refresh, json).await?,
    Command::Show { id, json } => commands::show(&repo, id, json).await?,
    Command::Status => commands::status(&repo)?,
    Command::Watch => commands::watch(&repo, &config).await?,
  }

  Ok(())
}
