//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use spotify_client::auth::StaticTokenProvider;
use spotify_client::config::ApiConfig;
use spotify_client::model::{AlbumId, ArtistId, PlaylistId, TrackId, UserId};
use spotify_client::repo::RepoStore;
use spotify_client::state::{LoadState, Navigator, Observable, ScreenContext, Session};
use wiremock::MockServer;

pub const TOKEN: &str = "test-token";

pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: format!("{}/v1", server.uri()),
        ..ApiConfig::default()
    }
}

pub fn repos(server: &MockServer) -> RepoStore {
    RepoStore::new(&api_config(server), Arc::new(StaticTokenProvider::bearer(TOKEN))).unwrap()
}

/// Screen context whose session counts logout requests.
pub fn context(
    server: &MockServer,
    page_size: u32,
) -> (ScreenContext, Arc<AtomicUsize>, Arc<RecordingNavigator>) {
    let expired = Arc::new(AtomicUsize::new(0));
    let counter = expired.clone();
    let session = Session::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let navigator = Arc::new(RecordingNavigator::default());
    let ctx = ScreenContext::new(repos(server), session, navigator.clone())
        .with_page_size(page_size)
        .unwrap();
    (ctx, expired, navigator)
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub opened: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    fn record(&self, what: String) {
        self.opened.lock().unwrap().push(what);
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn open_artist(&self, id: ArtistId) {
        self.record(id.uri());
    }

    fn open_album(&self, id: AlbumId) {
        self.record(id.uri());
    }

    fn open_playlist(&self, id: PlaylistId) {
        self.record(id.uri());
    }

    fn open_track(&self, id: TrackId) {
        self.record(id.uri());
    }

    fn open_user(&self, id: UserId) {
        self.record(id.uri());
    }
}

/// Wait until a single-object state leaves `Loading`.
pub async fn settled<T: Clone>(state: &Observable<LoadState<T>>) -> LoadState<T> {
    let mut rx = state.subscribe();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|s| !s.is_loading()))
        .await
        .expect("state settles")
        .unwrap()
        .clone()
}

/// Wait until a loading latch drops.
pub async fn idle(loading: &Observable<bool>) {
    let mut rx = loading.subscribe();
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(|busy| !*busy))
        .await
        .expect("request finishes")
        .unwrap();
}

pub fn artist_ref(n: usize) -> Value {
    json!({ "id": format!("artist{n}"), "name": format!("Artist {n}") })
}

pub fn artist(n: usize) -> Value {
    json!({
        "id": format!("artist{n}"),
        "name": format!("Artist {n}"),
        "genres": ["rock"],
        "followers": { "href": null, "total": 1000 + n },
        "images": [{ "url": format!("https://i.scdn.co/image/a{n}"), "width": 320, "height": 320 }],
        "popularity": 50,
        "type": "artist"
    })
}

pub fn album(n: usize) -> Value {
    json!({
        "id": format!("album{n}"),
        "name": format!("Album {n}"),
        "album_type": "album",
        "artists": [artist_ref(n)],
        "images": [],
        "release_date": "2021-05-07",
        "total_tracks": 10
    })
}

pub fn saved_album(n: usize) -> Value {
    json!({ "added_at": "2024-01-01T00:00:00Z", "album": album(n) })
}

pub fn track(n: usize) -> Value {
    json!({
        "id": format!("track{n}"),
        "name": format!("Track {n}"),
        "type": "track",
        "artists": [artist_ref(0)],
        "album": { "id": "album0", "name": "Album 0", "images": [] },
        "duration_ms": 200_000,
        "explicit": false,
        "popularity": 10
    })
}

pub fn playlist_track(n: usize) -> Value {
    json!({ "added_at": "2024-01-01T00:00:00Z", "is_local": false, "track": track(n) })
}

pub fn simplified_playlist(n: usize) -> Value {
    json!({
        "id": format!("playlist{n}"),
        "name": format!("Playlist {n}"),
        "owner": { "id": "owner", "display_name": "Owner" },
        "images": null,
        "tracks": { "href": null, "total": 12 }
    })
}

pub fn paging(items: Vec<Value>, total: usize) -> Value {
    json!({ "href": null, "items": items, "limit": 20, "offset": 0, "total": total, "next": null })
}
