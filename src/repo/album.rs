use std::sync::Arc;

use crate::error::Result;
use crate::model::{
    mapper, wire, Album, AlbumId, AlbumListItem, ArtistAlbum, ArtistId, Page, PageRequest,
};
use crate::{log_api_request, log_api_result};

use super::transport::HttpTransport;

#[derive(Clone)]
pub struct AlbumRepo {
    transport: Arc<HttpTransport>,
}

impl AlbumRepo {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET /me/albums
    pub async fn get_saved_albums(&self, page: PageRequest) -> Result<Page<AlbumListItem>> {
        log_api_request!("saved_albums", limit = page.limit(), offset = page.offset());
        let result = self
            .transport
            .get::<wire::SavedAlbums>(&["me", "albums"], &page.query())
            .await
            .map(|albums| mapper::saved_albums(albums, page));
        log_api_result!("saved_albums", result);
        result
    }

    /// GET /artists/{id}/albums
    pub async fn get_artist_albums(
        &self,
        id: &ArtistId,
        page: PageRequest,
    ) -> Result<Page<ArtistAlbum>> {
        log_api_request!("artist_albums", id = %id, limit = page.limit(), offset = page.offset());
        let result = self
            .transport
            .get::<wire::ArtistAlbums>(&["artists", id.as_str(), "albums"], &page.query())
            .await
            .map(|albums| mapper::artist_albums(albums, page));
        log_api_result!("artist_albums", result);
        result
    }

    /// GET /albums/{id}
    pub async fn get_album(&self, id: &AlbumId) -> Result<Album> {
        log_api_request!("album", id = %id);
        let result = self
            .transport
            .get::<wire::Album>(&["albums", id.as_str()], &[])
            .await
            .map(|album| mapper::album(album, id));
        log_api_result!("album", result);
        result
    }
}
