use std::sync::Arc;

use crate::error::Result;
use crate::model::{
    mapper, wire, Page, PageRequest, Playlist, PlaylistId, PlaylistListItem, PlaylistTrack, UserId,
};
use crate::{log_api_request, log_api_result};

use super::transport::HttpTransport;

#[derive(Clone)]
pub struct PlaylistRepo {
    transport: Arc<HttpTransport>,
}

impl PlaylistRepo {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET /me/playlists
    pub async fn get_current_user_playlists(
        &self,
        page: PageRequest,
    ) -> Result<Page<PlaylistListItem>> {
        log_api_request!("current_user_playlists", limit = page.limit(), offset = page.offset());
        let result = self
            .transport
            .get::<wire::Playlists>(&["me", "playlists"], &page.query())
            .await
            .map(|playlists| mapper::playlists(playlists, page));
        log_api_result!("current_user_playlists", result);
        result
    }

    /// GET /playlists/{playlist_id}
    pub async fn get_playlist(&self, id: &PlaylistId) -> Result<Playlist> {
        log_api_request!("playlist", id = %id);
        let result = self
            .transport
            .get::<wire::Playlist>(&["playlists", id.as_str()], &[])
            .await
            .map(|playlist| mapper::playlist(playlist, id));
        log_api_result!("playlist", result);
        result
    }

    /// GET /playlists/{playlist_id}/tracks
    pub async fn get_playlist_tracks(
        &self,
        id: &PlaylistId,
        page: PageRequest,
    ) -> Result<Page<PlaylistTrack>> {
        log_api_request!("playlist_tracks", id = %id, limit = page.limit(), offset = page.offset());
        let result = self
            .transport
            .get::<wire::PlaylistTracks>(&["playlists", id.as_str(), "tracks"], &page.query())
            .await
            .map(|tracks| mapper::playlist_tracks(tracks, page));
        log_api_result!("playlist_tracks", result);
        result
    }

    /// GET /users/{user_id}/playlists
    pub async fn get_user_playlists(
        &self,
        user_id: &UserId,
        page: PageRequest,
    ) -> Result<Page<PlaylistListItem>> {
        log_api_request!(
            "user_playlists",
            user_id = %user_id,
            limit = page.limit(),
            offset = page.offset()
        );
        let result = self
            .transport
            .get::<wire::Playlists>(&["users", user_id.as_str(), "playlists"], &page.query())
            .await
            .map(|playlists| mapper::playlists(playlists, page));
        log_api_result!("user_playlists", result);
        result
    }
}
