//! Repositories - one per Web API resource family
//!
//! - `transport`: shared HTTP client, bearer auth and error mapping
//! - `artist`, `album`, `playlist`, `user`, `track`: resource lookups
//! - `search`: catalog search
//! - `player`: playback control
//!
//! Each repository method issues exactly one request and never retries.

mod album;
mod artist;
mod player;
mod playlist;
mod search;
mod track;
mod transport;
mod user;

use std::sync::Arc;

pub use album::AlbumRepo;
pub use artist::ArtistRepo;
pub use player::{PlayContext, PlayerRepo};
pub use playlist::PlaylistRepo;
pub use search::SearchRepo;
pub use track::TrackRepo;
pub use transport::HttpTransport;
pub use user::UserRepo;

use crate::auth::TokenProvider;
use crate::config::ApiConfig;
use crate::error::Result;

/// All repositories sharing one transport.
#[derive(Clone)]
pub struct RepoStore {
    pub artists: ArtistRepo,
    pub albums: AlbumRepo,
    pub playlists: PlaylistRepo,
    pub users: UserRepo,
    pub search: SearchRepo,
    pub tracks: TrackRepo,
    pub player: PlayerRepo,
    transport: Arc<HttpTransport>,
}

impl RepoStore {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(config, tokens)?);
        Ok(Self::with_transport(transport))
    }

    pub fn with_transport(transport: Arc<HttpTransport>) -> Self {
        Self {
            artists: ArtistRepo::new(transport.clone()),
            albums: AlbumRepo::new(transport.clone()),
            playlists: PlaylistRepo::new(transport.clone()),
            users: UserRepo::new(transport.clone()),
            search: SearchRepo::new(transport.clone()),
            tracks: TrackRepo::new(transport.clone()),
            player: PlayerRepo::new(transport.clone()),
            transport,
        }
    }

    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }
}
