//! Connectivity events and the refresh trigger driven by them.

use std::future::Future;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, timeout, Instant};
use tracing::{debug, info};

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
  /// Network reachability changed; `true` means connected
  Connectivity(bool),
}

/// Event channel fed by background probes
pub struct EventHandler {
  tx: mpsc::UnboundedSender<Event>,
  rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
  pub fn new() -> Self {
    let (tx, rx) = mpsc::unbounded_channel();
    Self { tx, rx }
  }

  /// Sender for feeding events from elsewhere
  #[allow(dead_code)]
  pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
    self.tx.clone()
  }

  /// Spawn a probe that checks `addr` (host:port) every `interval` and emits
  /// an event whenever reachability changes, starting with the first result.
  pub fn spawn_connectivity_probe(&self, addr: String, interval: Duration) {
    let tx = self.tx.clone();

    tokio::spawn(async move {
      let mut last: Option<bool> = None;
      loop {
        let connected = matches!(
          timeout(interval, TcpStream::connect(addr.as_str())).await,
          Ok(Ok(_))
        );

        if last != Some(connected) {
          debug!(%addr, connected, "connectivity changed");
          if tx.send(Event::Connectivity(connected)).is_err() {
            break;
          }
          last = Some(connected);
        }

        tokio::time::sleep(interval).await;
      }
    });
  }

  /// Receive the next event
  pub async fn next(&mut self) -> Option<Event> {
    self.rx.recv().await
  }
}

impl Default for EventHandler {
  fn default() -> Self {
    Self::new()
  }
}

/// Runs a refresh after the network comes back.
///
/// Only "became connected" events count. Each one restarts the debounce
/// window; a disconnect inside the window cancels the pending refresh.
pub struct RefreshTrigger {
  debounce: Duration,
}

impl RefreshTrigger {
  pub fn new(debounce: Duration) -> Self {
    Self { debounce }
  }

  /// Consume events until the channel closes, calling `refresh` once per
  /// settled reconnect.
  pub async fn run<F, Fut>(&self, events: &mut EventHandler, mut refresh: F)
  where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
  {
    let mut pending: Option<Instant> = None;

    loop {
      let deadline = pending;
      tokio::select! {
        event = events.next() => match event {
          Some(Event::Connectivity(true)) => {
            pending = Some(Instant::now() + self.debounce);
          }
          Some(Event::Connectivity(false)) => {
            pending = None;
          }
          None => break,
        },
        _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
          pending = None;
          info!("connection restored, refreshing albums");
          refresh().await;
        }
      }
    }
  }
}
