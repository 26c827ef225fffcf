//! Screen state driven by a mock Web API.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use serde_json::json;
use spotify_client::model::{AlbumId, ArtistId, PlaylistId, SearchType, TrackId, UserId};
use spotify_client::state::{
    AlbumListScreen, ArtistScreen, FollowedArtistsScreen, LoadState, PlaylistListScreen,
    PlaylistScreen, SearchScreen, UserScreen,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::*;

#[tokio::test]
async fn test_short_first_page_exhausts_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/albums"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paging((0..15).map(saved_album).collect(), 15)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, expired, _) = context(&server, 20);
    let screen = AlbumListScreen::open(&ctx);
    idle(screen.albums.loading()).await;

    let state = screen.albums.items().get();
    assert_eq!(state.loaded().map(Vec::len), Some(15));
    assert!(!screen.albums.loading().get());

    // the last page was short: nothing more to fetch
    screen.on_load_more();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(screen.albums.items().get().loaded().map(Vec::len), Some(15));
    assert_eq!(expired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_load_more_appends_next_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/playlists"))
        .and(query_param("offset", "0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paging((0..2).map(simplified_playlist).collect(), 3)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/playlists"))
        .and(query_param("offset", "2"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(paging(vec![simplified_playlist(2)], 3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _, navigator) = context(&server, 2);
    let screen = PlaylistListScreen::open(&ctx);
    idle(screen.playlists.loading()).await;

    screen.on_load_more();
    // a second trigger while the page is in flight is ignored
    screen.on_load_more();
    idle(screen.playlists.loading()).await;

    let items = screen.playlists.items().get();
    let ids: Vec<_> = items.loaded().unwrap().iter().map(|p| p.id.to_string()).collect();
    assert_eq!(ids, vec!["playlist0", "playlist1", "playlist2"]);
    assert!(screen.playlists.is_exhausted());

    screen.on_playlist_click(&PlaylistId::new("playlist1").unwrap());
    assert_eq!(navigator.opened(), vec!["spotify:playlist:playlist1".to_string()]);
}

#[tokio::test]
async fn test_null_entry_does_not_end_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/albums"))
        .and(query_param("limit", "3"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [saved_album(0), null, saved_album(2)],
            "limit": 3,
            "offset": 0,
            "total": 6,
            "next": format!("{}/v1/me/albums?offset=3&limit=3", server.uri())
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/albums"))
        .and(query_param("limit", "3"))
        .and(query_param("offset", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [saved_album(3), saved_album(4), saved_album(5)],
            "limit": 3,
            "offset": 3,
            "total": 6,
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _, _) = context(&server, 3);
    let screen = AlbumListScreen::open(&ctx);
    idle(screen.albums.loading()).await;
    assert_eq!(screen.albums.items().get().loaded().map(Vec::len), Some(2));
    assert!(!screen.albums.is_exhausted());

    assert!(screen.albums.load_more());
    idle(screen.albums.loading()).await;
    let items = screen.albums.items().get();
    let ids: Vec<_> = items.loaded().unwrap().iter().map(|a| a.id.to_string()).collect();
    assert_eq!(ids, vec!["album0", "album2", "album3", "album4", "album5"]);
    assert!(screen.albums.is_exhausted());
}

#[tokio::test]
async fn test_followed_artists_page_by_cursor() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/following"))
        .and(query_param("after", "artist1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": { "items": [artist(2)], "cursors": { "after": null } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/me/following"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "artists": { "items": [artist(0), artist(1)], "cursors": { "after": "artist1" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _, navigator) = context(&server, 2);
    let screen = FollowedArtistsScreen::open(&ctx);
    idle(screen.artists.loading()).await;
    screen.on_load_more();
    idle(screen.artists.loading()).await;

    let names: Vec<_> = screen
        .artists
        .items()
        .get()
        .loaded()
        .unwrap()
        .iter()
        .map(|a| a.name.clone())
        .collect();
    assert_eq!(names, vec!["Artist 0", "Artist 1", "Artist 2"]);

    screen.on_artist_click(&ArtistId::new("artist2").unwrap());
    assert_eq!(navigator.opened(), vec!["spotify:artist:artist2".to_string()]);
}

#[tokio::test]
async fn test_missing_artist_fails_with_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/artists/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "status": 404, "message": "Non existing id" }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/artists/gone/albums"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paging(vec![], 0)))
        .mount(&server)
        .await;

    let (ctx, expired, _) = context(&server, 20);
    let screen = ArtistScreen::open(&ctx, ArtistId::new("gone").unwrap());

    assert_eq!(settled(screen.artist.state()).await, LoadState::Failed("Not found.".to_string()));
    idle(screen.albums.loading()).await;
    assert_eq!(screen.albums.items().get(), LoadState::Loaded(vec![]));
    assert_eq!(expired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_401_requests_logout_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (ctx, expired, _) = context(&server, 20);
    let user = UserScreen::open(&ctx, UserId::new("someone").unwrap());
    let albums = AlbumListScreen::open(&ctx);

    let state = settled(user.user.state()).await;
    assert!(state.error().is_some());
    idle(user.playlists.loading()).await;
    idle(albums.albums.loading()).await;
    assert!(albums.albums.items().get().error().is_some());

    assert_eq!(expired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_playlist_tracks_continue_after_embedded_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/pl1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pl1",
            "name": "Mix",
            "owner": { "id": "owner", "display_name": "Owner" },
            "tracks": { "items": [playlist_track(0), playlist_track(1)], "total": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/pl1/tracks"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paging(vec![playlist_track(2)], 3)))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _, navigator) = context(&server, 2);
    let screen = PlaylistScreen::open(&ctx, PlaylistId::new("pl1").unwrap());

    let playlist = settled(screen.playlist.state()).await;
    assert_eq!(playlist.loaded().map(|p| p.total_tracks), Some(3));
    assert_eq!(screen.tracks.items().get().loaded().map(Vec::len), Some(2));

    screen.on_load_more_tracks();
    idle(screen.tracks.loading()).await;
    let items = screen.tracks.items().get();
    let ids: Vec<_> = items.loaded().unwrap().iter().map(|t| t.id.to_string()).collect();
    assert_eq!(ids, vec!["track0", "track1", "track2"]);
    assert!(screen.tracks.is_exhausted());

    screen.on_owner_click(&UserId::new("owner").unwrap());
    assert_eq!(navigator.opened(), vec!["spotify:user:owner".to_string()]);
}

#[tokio::test]
async fn test_local_file_in_embedded_page_keeps_the_offset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/pl1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pl1",
            "name": "Mix",
            "tracks": {
                "items": [
                    playlist_track(0),
                    { "is_local": true, "track": { "id": null, "name": "Home recording" } }
                ],
                "total": 4
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/pl1/tracks"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paging(vec![playlist_track(2), playlist_track(3)], 4)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _, _) = context(&server, 2);
    let screen = PlaylistScreen::open(&ctx, PlaylistId::new("pl1").unwrap());
    settled(screen.playlist.state()).await;
    assert_eq!(screen.tracks.items().get().loaded().map(Vec::len), Some(1));
    assert!(!screen.tracks.is_exhausted());

    screen.on_load_more_tracks();
    idle(screen.tracks.loading()).await;
    let items = screen.tracks.items().get();
    let ids: Vec<_> = items.loaded().unwrap().iter().map(|t| t.id.to_string()).collect();
    assert_eq!(ids, vec!["track0", "track2", "track3"]);
    assert!(screen.tracks.is_exhausted());
}

#[tokio::test]
async fn test_missing_playlist_fails_its_tracks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/playlists/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "status": 404, "message": "Non existing id" }
        })))
        .mount(&server)
        .await;

    let (ctx, _, _) = context(&server, 20);
    let screen = PlaylistScreen::open(&ctx, PlaylistId::new("gone").unwrap());

    fn failed<T>() -> LoadState<T> {
        LoadState::Failed("Not found.".to_string())
    }
    assert_eq!(settled(screen.playlist.state()).await, failed());
    assert_eq!(settled(screen.tracks.items()).await, failed());
    assert!(!screen.tracks.loading().get());
    assert_eq!(screen.tracks.last_error().get().as_deref(), Some("Not found."));
}

#[tokio::test]
async fn test_search_track_click_opens_track() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": { "items": [track(4)] }
        })))
        .mount(&server)
        .await;

    let (ctx, _, navigator) = context(&server, 10);
    let screen = SearchScreen::open(&ctx);
    screen.on_search("four", &[SearchType::Track]);
    idle(&screen.loading).await;

    let result = screen.result.get().unwrap();
    screen.on_track_click(&result.tracks[0].id);
    screen.on_track_click(&TrackId::new("track9").unwrap());
    assert_eq!(
        navigator.opened(),
        vec!["spotify:track:track4".to_string(), "spotify:track:track9".to_string()]
    );
}

#[tokio::test]
async fn test_search_fills_only_returned_categories() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("type", "track,artist,album,playlist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "albums": { "items": [album(1)] },
            "artists": null
        })))
        .mount(&server)
        .await;

    let (ctx, _, navigator) = context(&server, 10);
    let screen = SearchScreen::open(&ctx);
    assert_eq!(screen.result.get(), None);

    screen.on_search("discovery", &SearchType::ALL);
    assert!(screen.loading.get());
    idle(&screen.loading).await;

    let result = screen.result.get().unwrap();
    assert_eq!(result.albums.len(), 1);
    assert!(result.tracks.is_empty());
    assert!(result.artists.is_empty());
    assert!(result.playlists.is_empty());
    assert_eq!(screen.error.get(), None);

    screen.on_album_click(&AlbumId::new("album1").unwrap());
    assert_eq!(navigator.opened(), vec!["spotify:album:album1".to_string()]);
}

#[tokio::test]
async fn test_newer_search_replaces_older() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "artists": { "items": [artist(1)] } }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("q", "fast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "artists": { "items": [artist(2)] } })),
        )
        .mount(&server)
        .await;

    let (ctx, _, _) = context(&server, 10);
    let screen = SearchScreen::open(&ctx);
    screen.on_search("slow", &[SearchType::Artist]);
    screen.on_search("fast", &[SearchType::Artist]);
    idle(&screen.loading).await;

    // give the cancelled request time to have answered
    tokio::time::sleep(Duration::from_millis(500)).await;
    let result = screen.result.get().unwrap();
    assert_eq!(result.artists.len(), 1);
    assert_eq!(result.artists[0].name, "Artist 2");
    assert!(!screen.loading.get());
}

#[tokio::test]
async fn test_play_failure_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/me/player/play"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "status": 403, "message": "Player command failed: Premium required" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (ctx, _, _) = context(&server, 10);
    let screen = SearchScreen::open(&ctx);
    let mut errors = screen.playback.error().subscribe();
    screen.on_play_playlist_click(&PlaylistId::new("pl1").unwrap());

    tokio::time::timeout(Duration::from_secs(5), errors.wait_for(|e| e.is_some()))
        .await
        .expect("play finishes")
        .unwrap();
    assert_eq!(
        screen.playback.error().get().as_deref(),
        Some("Action forbidden. Check your Spotify Premium status.")
    );
}

#[tokio::test]
async fn test_dropped_screen_publishes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/albums"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(paging(vec![saved_album(0)], 1))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let (ctx, _, _) = context(&server, 20);
    let screen = AlbumListScreen::open(&ctx);
    let albums = screen.albums.clone();
    drop(screen);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(albums.items().get().is_loading());
}
