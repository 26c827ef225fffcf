use std::sync::Arc;

use crate::model::{AlbumId, Artist, ArtistAlbum, ArtistId};
use crate::repo::PlayContext;

use super::pager::{page_fetcher, PageCursor, Pager};
use super::playback::Playback;
use super::resource::Resource;
use super::scope::ScreenScope;
use super::{Navigator, ScreenContext};

/// An artist page: the artist and a growing list of their albums.
pub struct ArtistScreen {
    pub artist: Resource<Artist>,
    pub albums: Pager<ArtistAlbum>,
    pub playback: Playback,
    id: ArtistId,
    navigator: Arc<dyn Navigator>,
    _scope: ScreenScope,
}

impl ArtistScreen {
    pub fn open(ctx: &ScreenContext, id: ArtistId) -> Self {
        let scope = ctx.scope();

        let repo = ctx.repos.artists.clone();
        let artist_id = id.clone();
        let artist = Resource::load(scope.handle(), move || {
            let repo = repo.clone();
            let id = artist_id.clone();
            async move { repo.get(&id).await }
        });

        let repo = ctx.repos.albums.clone();
        let artist_id = id.clone();
        let albums = Pager::start(
            scope.handle(),
            ctx.page,
            page_fetcher(move |cursor: PageCursor| {
                let repo = repo.clone();
                let id = artist_id.clone();
                async move { repo.get_artist_albums(&id, cursor.page).await }
            }),
        );

        Self {
            artist,
            albums,
            playback: Playback::new(ctx.repos.player.clone(), scope.handle()),
            id,
            navigator: ctx.navigator.clone(),
            _scope: scope,
        }
    }

    pub fn on_load_more_albums(&self) {
        self.albums.load_more();
    }

    pub fn on_album_click(&self, id: &AlbumId) {
        self.navigator.open_album(id.clone());
    }

    pub fn on_play_click(&self) {
        self.playback.play(PlayContext::Artist(self.id.clone()));
    }

    pub fn on_play_album_click(&self, id: &AlbumId) {
        self.playback.play(PlayContext::Album(id.clone()));
    }
}

/// Artists the user follows. Pages by cursor: each request continues after
/// the last artist received.
pub struct FollowedArtistsScreen {
    pub artists: Pager<Artist>,
    pub playback: Playback,
    navigator: Arc<dyn Navigator>,
    _scope: ScreenScope,
}

impl FollowedArtistsScreen {
    pub fn open(ctx: &ScreenContext) -> Self {
        let scope = ctx.scope();
        let repo = ctx.repos.artists.clone();
        let artists = Pager::start(
            scope.handle(),
            ctx.page,
            page_fetcher(move |cursor: PageCursor| {
                let repo = repo.clone();
                async move {
                    let after = cursor.after.map(ArtistId::new).transpose()?;
                    let limit = Some(cursor.page.limit());
                    repo.get_current_user_followed_artists(after.as_ref(), limit).await
                }
            }),
        );
        Self {
            artists,
            playback: Playback::new(ctx.repos.player.clone(), scope.handle()),
            navigator: ctx.navigator.clone(),
            _scope: scope,
        }
    }

    pub fn on_load_more(&self) {
        self.artists.load_more();
    }

    pub fn on_artist_click(&self, id: &ArtistId) {
        self.navigator.open_artist(id.clone());
    }

    pub fn on_play_artist_click(&self, id: &ArtistId) {
        self.playback.play(PlayContext::Artist(id.clone()));
    }
}
