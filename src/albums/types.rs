use serde::Serialize;

/// Album as held by the local store.
///
/// Field-for-field equivalent of [`ApiAlbum`](super::api_types::ApiAlbum);
/// `id` is the identity shared by both forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
  pub id: i64,
  /// Grouping key from the source feed, not a local relation
  pub group_id: i64,
  pub title: String,
  pub image_url: String,
  pub thumbnail_url: String,
}
