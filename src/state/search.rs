use std::sync::{Arc, Mutex, PoisonError};

use crate::model::{AlbumId, ArtistId, PlaylistId, SearchResult, SearchType, TrackId};
use crate::repo::{PlayContext, SearchRepo};

use super::observable::Observable;
use super::playback::Playback;
use super::scope::{ScopeHandle, ScreenScope};
use super::{Navigator, ScreenContext};

/// The newest search. A task publishes only while its generation is still
/// the current one, checked under the same lock `on_search` takes.
#[derive(Default)]
struct Searches {
    generation: u64,
    running: Option<ScopeHandle>,
}

impl Searches {
    /// Make `search` the newest; returns its generation and the search it
    /// replaces.
    fn begin(&mut self, search: ScopeHandle) -> (u64, Option<ScopeHandle>) {
        self.generation += 1;
        (self.generation, self.running.replace(search))
    }
}

fn publish_if_current(searches: &Mutex<Searches>, generation: u64, publish: impl FnOnce()) -> bool {
    let searches = searches.lock().unwrap_or_else(PoisonError::into_inner);
    if searches.generation != generation {
        return false;
    }
    publish();
    true
}

/// Catalog search. Starting a search cancels the one still running, so only
/// the newest query ever publishes a result.
pub struct SearchScreen {
    /// `None` until the first search completes
    pub result: Arc<Observable<Option<SearchResult>>>,
    pub loading: Arc<Observable<bool>>,
    pub error: Arc<Observable<Option<String>>>,
    pub playback: Playback,
    repo: SearchRepo,
    limit: u32,
    searches: Arc<Mutex<Searches>>,
    navigator: Arc<dyn Navigator>,
    scope: ScreenScope,
}

impl SearchScreen {
    pub fn open(ctx: &ScreenContext) -> Self {
        let scope = ctx.scope();
        Self {
            result: Arc::new(Observable::new(None)),
            loading: Arc::new(Observable::new(false)),
            error: Arc::new(Observable::new(None)),
            playback: Playback::new(ctx.repos.player.clone(), scope.handle()),
            repo: ctx.repos.search.clone(),
            limit: ctx.page.limit(),
            searches: Arc::new(Mutex::new(Searches::default())),
            navigator: ctx.navigator.clone(),
            scope,
        }
    }

    pub fn on_search(&self, query: &str, types: &[SearchType]) {
        let search = self.scope.handle().child();
        let (generation, previous) = {
            let mut searches = self.searches.lock().unwrap_or_else(PoisonError::into_inner);
            let begun = searches.begin(search.clone());
            self.loading.set(true);
            self.error.set(None);
            begun
        };
        if let Some(previous) = previous {
            previous.cancel();
        }

        let repo = self.repo.clone();
        let query = query.to_string();
        let types = types.to_vec();
        let limit = self.limit;
        let searches = self.searches.clone();
        let result = self.result.clone();
        let loading = self.loading.clone();
        let error = self.error.clone();
        let handle = search.clone();
        search.launch(async move {
            let found = repo.search(&query, &types, Some(limit)).await;
            let published = publish_if_current(&searches, generation, || {
                match found {
                    Ok(found) => {
                        let empty = found.is_empty();
                        tracing::debug!(query = %query, empty, "Search finished");
                        result.set(Some(found));
                    }
                    Err(e) => error.set(Some(handle.session().describe(&e))),
                }
                loading.set(false);
            });
            if !published {
                tracing::debug!(query = %query, "Dropping superseded search");
            }
        });
    }

    pub fn on_artist_click(&self, id: &ArtistId) {
        self.navigator.open_artist(id.clone());
    }

    pub fn on_album_click(&self, id: &AlbumId) {
        self.navigator.open_album(id.clone());
    }

    pub fn on_playlist_click(&self, id: &PlaylistId) {
        self.navigator.open_playlist(id.clone());
    }

    pub fn on_track_click(&self, id: &TrackId) {
        self.navigator.open_track(id.clone());
    }

    pub fn on_play_track_click(&self, id: &TrackId) {
        self.playback.play_track(id.clone());
    }

    pub fn on_play_artist_click(&self, id: &ArtistId) {
        self.playback.play(PlayContext::Artist(id.clone()));
    }

    pub fn on_play_album_click(&self, id: &AlbumId) {
        self.playback.play(PlayContext::Album(id.clone()));
    }

    pub fn on_play_playlist_click(&self, id: &PlaylistId) {
        self.playback.play(PlayContext::Playlist(id.clone()));
    }
}
