//! Playback control on the user's active Spotify Connect device.
//!
//! Audio itself is produced by whatever device is active; these calls only
//! steer it.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::model::{AlbumId, ArtistId, PlaylistId, TrackId};
use crate::{log_api_request, log_api_result};

use super::transport::HttpTransport;

/// Something that can be started as a playback context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayContext {
    Album(AlbumId),
    Artist(ArtistId),
    Playlist(PlaylistId),
}

impl PlayContext {
    pub fn uri(&self) -> String {
        match self {
            PlayContext::Album(id) => id.uri(),
            PlayContext::Artist(id) => id.uri(),
            PlayContext::Playlist(id) => id.uri(),
        }
    }

    /// Parse `spotify:<kind>:<id>`.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let mut parts = uri.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some("spotify"), Some("album"), Some(id), None) => {
                Ok(Self::Album(AlbumId::new(id)?))
            }
            (Some("spotify"), Some("artist"), Some(id), None) => {
                Ok(Self::Artist(ArtistId::new(id)?))
            }
            (Some("spotify"), Some("playlist"), Some(id), None) => {
                Ok(Self::Playlist(PlaylistId::new(id)?))
            }
            _ => Err(ApiError::InvalidArgument(format!("unknown context uri: {uri}"))),
        }
    }
}

#[derive(Serialize)]
struct PlayBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    context_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    uris: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct PlayerRepo {
    transport: Arc<HttpTransport>,
}

impl PlayerRepo {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// PUT /me/player/play with a context uri
    pub async fn play_context(&self, context: &PlayContext) -> Result<()> {
        let body = PlayBody {
            context_uri: Some(context.uri()),
            uris: None,
        };
        log_api_request!("play_context", context = %context.uri());
        let result = self.transport.put(&["me", "player", "play"], Some(&body)).await;
        log_api_result!("play_context", result);
        result
    }

    /// PUT /me/player/play with an explicit track list
    pub async fn play_tracks(&self, tracks: &[TrackId]) -> Result<()> {
        if tracks.is_empty() {
            return Err(ApiError::InvalidArgument("no tracks to play".into()));
        }
        let body = PlayBody {
            context_uri: None,
            uris: Some(tracks.iter().map(TrackId::uri).collect()),
        };
        log_api_request!("play_tracks", count = tracks.len());
        let result = self.transport.put(&["me", "player", "play"], Some(&body)).await;
        log_api_result!("play_tracks", result);
        result
    }

    /// PUT /me/player/pause
    pub async fn pause(&self) -> Result<()> {
        log_api_request!("pause");
        let result = self.transport.put::<()>(&["me", "player", "pause"], None).await;
        log_api_result!("pause", result);
        result
    }
}
