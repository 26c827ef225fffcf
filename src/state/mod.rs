//! State module - per-screen observable state
//!
//! - `observable`: watch-backed values and `LoadState`
//! - `scope`: screen lifecycles, cancellation and session expiry
//! - `pager`, `resource`: the two fetch patterns every screen is built from
//! - one file per screen family
//!
//! Screens spawn their work on the runtime and never block the caller.

mod album;
mod artist;
mod observable;
mod pager;
mod playback;
mod playlist;
mod resource;
mod scope;
mod search;
mod user;

use std::sync::Arc;

pub use album::{AlbumListScreen, AlbumScreen};
pub use artist::{ArtistScreen, FollowedArtistsScreen};
pub use observable::{LoadState, Observable};
pub use pager::{page_fetcher, PageCursor, PageFetcher, Pager};
pub use playback::Playback;
pub use playlist::{PlaylistListScreen, PlaylistScreen};
pub use resource::Resource;
pub use scope::{ScopeHandle, ScreenScope, Session};
pub use search::SearchScreen;
pub use user::UserScreen;

use crate::model::{AlbumId, ArtistId, PageRequest, PlaylistId, TrackId, UserId};
use crate::repo::RepoStore;

/// Where item clicks go. Implemented by the host application.
pub trait Navigator: Send + Sync {
    fn open_artist(&self, id: ArtistId);
    fn open_album(&self, id: AlbumId);
    fn open_playlist(&self, id: PlaylistId);
    fn open_track(&self, id: TrackId);
    fn open_user(&self, id: UserId);
}

/// Everything a screen needs from the application.
#[derive(Clone)]
pub struct ScreenContext {
    pub repos: RepoStore,
    pub session: Session,
    pub navigator: Arc<dyn Navigator>,
    /// Size of every page a screen requests
    pub page: PageRequest,
}

impl ScreenContext {
    pub fn new(repos: RepoStore, session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            repos,
            session,
            navigator,
            page: PageRequest::default(),
        }
    }

    pub fn with_page_size(mut self, limit: u32) -> crate::error::Result<Self> {
        self.page = PageRequest::first(limit)?;
        Ok(self)
    }

    fn scope(&self) -> ScreenScope {
        ScreenScope::new(self.session.clone())
    }
}
