use std::sync::Arc;

use crate::model::{
    PageRequest, Playlist, PlaylistId, PlaylistListItem, PlaylistTrack, TrackId, UserId,
};
use crate::repo::PlayContext;

use super::pager::{page_fetcher, PageCursor, Pager};
use super::playback::Playback;
use super::resource::Resource;
use super::scope::ScreenScope;
use super::{Navigator, ScreenContext};

/// The current user's playlists.
pub struct PlaylistListScreen {
    pub playlists: Pager<PlaylistListItem>,
    pub playback: Playback,
    navigator: Arc<dyn Navigator>,
    _scope: ScreenScope,
}

impl PlaylistListScreen {
    pub fn open(ctx: &ScreenContext) -> Self {
        let scope = ctx.scope();
        let repo = ctx.repos.playlists.clone();
        let playlists = Pager::start(
            scope.handle(),
            ctx.page,
            page_fetcher(move |cursor: PageCursor| {
                let repo = repo.clone();
                async move { repo.get_current_user_playlists(cursor.page).await }
            }),
        );
        Self {
            playlists,
            playback: Playback::new(ctx.repos.player.clone(), scope.handle()),
            navigator: ctx.navigator.clone(),
            _scope: scope,
        }
    }

    pub fn on_load_more(&self) {
        self.playlists.load_more();
    }

    pub fn on_playlist_click(&self, id: &PlaylistId) {
        self.navigator.open_playlist(id.clone());
    }

    pub fn on_play_playlist_click(&self, id: &PlaylistId) {
        self.playback.play(PlayContext::Playlist(id.clone()));
    }
}

/// One playlist. The playlist object embeds its first page of tracks, which
/// seeds `tracks`; further pages come from the tracks endpoint. If the
/// playlist itself fails, `tracks` fails with the same message.
pub struct PlaylistScreen {
    pub playlist: Resource<Playlist>,
    pub tracks: Pager<PlaylistTrack>,
    pub playback: Playback,
    id: PlaylistId,
    navigator: Arc<dyn Navigator>,
    _scope: ScreenScope,
}

impl PlaylistScreen {
    pub fn open(ctx: &ScreenContext, id: PlaylistId) -> Self {
        let scope = ctx.scope();
        let page = ctx.page;

        let repo = ctx.repos.playlists.clone();
        let playlist_id = id.clone();
        let tracks = Pager::pending(
            scope.handle(),
            page,
            page_fetcher(move |cursor: PageCursor| {
                let repo = repo.clone();
                let id = playlist_id.clone();
                async move { repo.get_playlist_tracks(&id, cursor.page).await }
            }),
        );

        let repo = ctx.repos.playlists.clone();
        let playlist_id = id.clone();
        let seed = tracks.clone();
        let playlist = Resource::load(scope.handle(), move || {
            let repo = repo.clone();
            let id = playlist_id.clone();
            let tracks = seed.clone();
            async move {
                match repo.get_playlist(&id).await {
                    Ok(playlist) => {
                        seed_tracks(&tracks, &playlist, page);
                        Ok(playlist)
                    }
                    Err(e) => {
                        tracks.fail(e.user_message());
                        Err(e)
                    }
                }
            }
        });

        Self {
            playlist,
            tracks,
            playback: Playback::new(ctx.repos.player.clone(), scope.handle()),
            id,
            navigator: ctx.navigator.clone(),
            _scope: scope,
        }
    }

    /// Refetch the playlist, which reseeds `tracks` or fails it again.
    pub fn on_reload(&self) {
        self.playlist.reload();
    }

    pub fn on_load_more_tracks(&self) {
        self.tracks.load_more();
    }

    pub fn on_owner_click(&self, id: &UserId) {
        self.navigator.open_user(id.clone());
    }

    pub fn on_play_click(&self) {
        self.playback.play(PlayContext::Playlist(self.id.clone()));
    }

    pub fn on_play_track_click(&self, id: &TrackId) {
        self.playback.play_track(id.clone());
    }
}

/// The next request starts after every embedded entry, including the ones
/// the mapper dropped.
fn seed_tracks(tracks: &Pager<PlaylistTrack>, playlist: &Playlist, page: PageRequest) {
    let embedded = &playlist.tracks;
    match PageRequest::new(page.limit(), embedded.received) {
        Ok(next) => tracks.seed(embedded.items.clone(), next, !embedded.has_next),
        Err(_) => tracks.seed(embedded.items.clone(), page, true),
    }
}
