use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use super::api_types::ApiAlbum;
use crate::cache::RemoteSource;
use crate::config::ApiConfig;

/// HTTP client for the album feed
#[derive(Clone)]
pub struct AlbumClient {
  client: reqwest::Client,
  feed_url: Url,
}

impl AlbumClient {
  pub fn new(config: &ApiConfig) -> Result<Self> {
    let feed_url = config.feed_url()?;

    let mut headers = HeaderMap::new();
    let user_agent = HeaderValue::from_str(&config.user_agent)
      .map_err(|e| eyre!("Invalid user agent {:?}: {}", config.user_agent, e))?;
    headers.insert(USER_AGENT, user_agent);

    let client = reqwest::Client::builder()
      .default_headers(headers)
      .timeout(config.timeout())
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client, feed_url })
  }
}

#[async_trait]
impl RemoteSource for AlbumClient {
  async fn fetch_albums(&self) -> Result<Vec<ApiAlbum>> {
    let response = self
      .client
      .get(self.feed_url.clone())
      .send()
      .await
      .map_err(|e| eyre!("Failed to fetch albums: {}", e))?
      .error_for_status()
      .map_err(|e| eyre!("Album feed returned an error: {}", e))?;

    response
      .json::<Vec<ApiAlbum>>()
      .await
      .map_err(|e| eyre!("Failed to parse album feed: {}", e))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tokio::io::{AsyncReadExt, AsyncWriteExt};
  use tokio::net::TcpListener;
  use tokio::task::JoinHandle;

  /// Serve one canned HTTP response and hand back the raw request head.
  async fn serve_once(status: &str, body: &str) -> (ApiConfig, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
      "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
      status,
      body.len(),
      body
    );

    let handle = tokio::spawn(async move {
      let (mut socket, _) = listener.accept().await.unwrap();
      let mut request: Vec<u8> = Vec::new();
      let mut buf = [0u8; 1024];
      while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
          break;
        }
        request.extend_from_slice(&buf[..n]);
      }
      let _ = socket.write_all(response.as_bytes()).await;
      let _ = socket.shutdown().await;
      String::from_utf8_lossy(&request).to_string()
    });

    let config = ApiConfig {
      base_url: format!("http://{}/img/", addr),
      timeout_secs: 5,
      ..ApiConfig::default()
    };
    (config, handle)
  }

  #[tokio::test]
  async fn test_fetch_parses_feed_and_sends_user_agent() {
    let body = r#"[{"albumId": 1, "id": 7, "title": "t", "url": "u", "thumbnailUrl": "th"}]"#;
    let (config, server) = serve_once("200 OK", body).await;
    let client = AlbumClient::new(&config).unwrap();

    let albums = client.fetch_albums().await.unwrap();
    let request = server.await.unwrap().to_lowercase();

    assert_eq!(albums.len(), 1);
    assert_eq!(albums[0].id, 7);
    assert!(request.starts_with("get /img/shared/technical-test.json "));
    assert!(request.contains("user-agent: leboncoinapp/1.0"));
  }

  #[tokio::test]
  async fn test_server_error_status_is_an_error() {
    let (config, server) = serve_once("500 Internal Server Error", "[]").await;
    let client = AlbumClient::new(&config).unwrap();

    assert!(client.fetch_albums().await.is_err());
    server.await.unwrap();
  }

  #[tokio::test]
  async fn test_malformed_payload_is_an_error() {
    let (config, server) = serve_once("200 OK", r#"{"albums": []}"#).await;
    let client = AlbumClient::new(&config).unwrap();

    assert!(client.fetch_albums().await.is_err());
    server.await.unwrap();
  }

  #[tokio::test]
  async fn test_unreachable_host_is_an_error() {
    let config = ApiConfig {
      base_url: "http://127.0.0.1:9/".to_string(),
      timeout_secs: 2,
      ..ApiConfig::default()
    };
    let client = AlbumClient::new(&config).unwrap();
    assert!(client.fetch_albums().await.is_err());
  }
}
