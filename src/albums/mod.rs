pub mod api_types;
pub mod client;
pub mod types;

pub use api_types::ApiAlbum;
pub use client::AlbumClient;
pub use types::Album;
