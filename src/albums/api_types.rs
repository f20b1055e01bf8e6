//! Serde-deserializable types matching the album feed.
//!
//! Kept apart from [`Album`] so the wire field names (`albumId`, `url`) stay
//! out of the stored form.

use serde::Deserialize;

use super::types::Album;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiAlbum {
  #[serde(rename = "albumId")]
  pub album_id: i64,
  pub id: i64,
  pub title: String,
  pub url: String,
  #[serde(rename = "thumbnailUrl")]
  pub thumbnail_url: String,
}

impl ApiAlbum {
  pub fn into_album(self) -> Album {
    Album {
      id: self.id,
      group_id: self.album_id,
      title: self.title,
      image_url: self.url,
      thumbnail_url: self.thumbnail_url,
    }
  }
}

impl Album {
  /// Wire form of a stored album. Only fixtures need this direction.
  #[cfg(test)]
  pub fn to_api(&self) -> ApiAlbum {
    ApiAlbum {
      album_id: self.group_id,
      id: self.id,
      title: self.title.clone(),
      url: self.image_url.clone(),
      thumbnail_url: self.thumbnail_url.clone(),
    }
  }
}
