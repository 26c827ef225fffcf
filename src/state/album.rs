use std::sync::Arc;

use crate::model::{Album, AlbumId, AlbumListItem, ArtistId, TrackId};
use crate::repo::PlayContext;

use super::pager::{page_fetcher, PageCursor, Pager};
use super::playback::Playback;
use super::resource::Resource;
use super::scope::ScreenScope;
use super::{Navigator, ScreenContext};

/// The user's saved albums.
pub struct AlbumListScreen {
    pub albums: Pager<AlbumListItem>,
    pub playback: Playback,
    navigator: Arc<dyn Navigator>,
    _scope: ScreenScope,
}

impl AlbumListScreen {
    pub fn open(ctx: &ScreenContext) -> Self {
        let scope = ctx.scope();
        let repo = ctx.repos.albums.clone();
        let albums = Pager::start(
            scope.handle(),
            ctx.page,
            page_fetcher(move |cursor: PageCursor| {
                let repo = repo.clone();
                async move { repo.get_saved_albums(cursor.page).await }
            }),
        );
        Self {
            albums,
            playback: Playback::new(ctx.repos.player.clone(), scope.handle()),
            navigator: ctx.navigator.clone(),
            _scope: scope,
        }
    }

    pub fn on_load_more(&self) {
        self.albums.load_more();
    }

    pub fn on_album_click(&self, id: &AlbumId) {
        self.navigator.open_album(id.clone());
    }

    pub fn on_play_album_click(&self, id: &AlbumId) {
        self.playback.play(PlayContext::Album(id.clone()));
    }
}

/// One album with its track list.
pub struct AlbumScreen {
    pub album: Resource<Album>,
    pub playback: Playback,
    id: AlbumId,
    navigator: Arc<dyn Navigator>,
    _scope: ScreenScope,
}

impl AlbumScreen {
    pub fn open(ctx: &ScreenContext, id: AlbumId) -> Self {
        let scope = ctx.scope();
        let repo = ctx.repos.albums.clone();
        let album_id = id.clone();
        let album = Resource::load(scope.handle(), move || {
            let repo = repo.clone();
            let id = album_id.clone();
            async move { repo.get_album(&id).await }
        });
        Self {
            album,
            playback: Playback::new(ctx.repos.player.clone(), scope.handle()),
            id,
            navigator: ctx.navigator.clone(),
            _scope: scope,
        }
    }

    pub fn on_reload(&self) {
        self.album.reload();
    }

    pub fn on_artist_click(&self, id: &ArtistId) {
        self.navigator.open_artist(id.clone());
    }

    pub fn on_play_click(&self) {
        self.playback.play(PlayContext::Album(self.id.clone()));
    }

    pub fn on_play_track_click(&self, id: &TrackId) {
        self.playback.play_track(id.clone());
    }
}
