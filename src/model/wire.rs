//! Web API response shapes
//!
//! Every field is optional: the API documents most of them as nullable and
//! in practice omits some for restricted or regional content. Lists may also
//! contain `null` entries (e.g. playlists removed after indexing in search).

use serde::Deserialize;

pub type Items<T> = Option<Vec<Option<T>>>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Followers {
    pub href: Option<String>,
    pub total: Option<u64>,
}

/// Paging object: `GET /me/albums`, `/me/playlists`, `/search` categories...
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Paging<T> {
    pub href: Option<String>,
    pub items: Items<T>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub total: Option<u32>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

impl<T> Default for Paging<T> {
    fn default() -> Self {
        Self {
            href: None,
            items: None,
            limit: None,
            offset: None,
            total: None,
            next: None,
            previous: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Cursors {
    pub after: Option<String>,
    pub before: Option<String>,
}

/// Cursor-based paging object used by `GET /me/following`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CursorPaging<T> {
    pub href: Option<String>,
    pub items: Items<T>,
    pub limit: Option<u32>,
    pub total: Option<u32>,
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
}

impl<T> Default for CursorPaging<T> {
    fn default() -> Self {
        Self {
            href: None,
            items: None,
            limit: None,
            total: None,
            next: None,
            cursors: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimplifiedArtist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub href: Option<String>,
    pub uri: Option<String>,
}

/// `GET /artists/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub genres: Option<Vec<String>>,
    pub followers: Option<Followers>,
    pub images: Option<Vec<Image>>,
    pub popularity: Option<u32>,
    pub href: Option<String>,
    pub uri: Option<String>,
}

/// `GET /me/following?type=artist`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FollowedArtists {
    pub artists: Option<CursorPaging<Artist>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimplifiedAlbum {
    pub id: Option<String>,
    pub name: Option<String>,
    pub album_type: Option<String>,
    pub artists: Option<Vec<SimplifiedArtist>>,
    pub images: Option<Vec<Image>>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u32>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimplifiedTrack {
    pub id: Option<String>,
    pub name: Option<String>,
    pub artists: Option<Vec<SimplifiedArtist>>,
    pub duration_ms: Option<u64>,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub explicit: Option<bool>,
    pub uri: Option<String>,
}

/// `GET /albums/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Album {
    pub id: Option<String>,
    pub name: Option<String>,
    pub album_type: Option<String>,
    pub artists: Option<Vec<SimplifiedArtist>>,
    pub images: Option<Vec<Image>>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u32>,
    pub label: Option<String>,
    pub genres: Option<Vec<String>>,
    pub popularity: Option<u32>,
    pub tracks: Option<Paging<SimplifiedTrack>>,
    pub uri: Option<String>,
}

/// Item of `GET /me/albums`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SavedAlbum {
    pub added_at: Option<String>,
    pub album: Option<Album>,
}

pub type SavedAlbums = Paging<SavedAlbum>;

/// `GET /artists/{id}/albums`
pub type ArtistAlbums = Paging<SimplifiedAlbum>;

/// `GET /tracks/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Track {
    pub id: Option<String>,
    pub name: Option<String>,
    pub artists: Option<Vec<SimplifiedArtist>>,
    pub album: Option<SimplifiedAlbum>,
    pub duration_ms: Option<u64>,
    pub track_number: Option<u32>,
    pub explicit: Option<bool>,
    pub popularity: Option<u32>,
    pub is_local: Option<bool>,
    /// `track` or `episode`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PublicUser {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub followers: Option<Followers>,
    pub images: Option<Vec<Image>>,
    pub href: Option<String>,
    pub uri: Option<String>,
}

/// `GET /users/{id}` and `GET /me`
pub type User = PublicUser;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistTracksRef {
    pub href: Option<String>,
    pub total: Option<u32>,
}

/// Item of `GET /me/playlists` and `GET /users/{id}/playlists`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimplifiedPlaylist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<PublicUser>,
    pub images: Option<Vec<Image>>,
    pub tracks: Option<PlaylistTracksRef>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
    pub uri: Option<String>,
}

pub type Playlists = Paging<SimplifiedPlaylist>;

/// Item of a playlist's track page
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaylistTrack {
    pub added_at: Option<String>,
    pub is_local: Option<bool>,
    pub track: Option<Track>,
}

pub type PlaylistTracks = Paging<PlaylistTrack>;

/// `GET /playlists/{id}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Playlist {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner: Option<PublicUser>,
    pub followers: Option<Followers>,
    pub images: Option<Vec<Image>>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
    pub tracks: Option<PlaylistTracks>,
    pub uri: Option<String>,
}

/// `GET /search`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
    pub artists: Option<Paging<Artist>>,
    pub albums: Option<Paging<SimplifiedAlbum>>,
    pub playlists: Option<Paging<SimplifiedPlaylist>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorBody {
    pub status: Option<u16>,
    pub message: Option<String>,
}

/// Error envelope: `{"error": {"status": 404, "message": "..."}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
    pub error: Option<ErrorBody>,
}
