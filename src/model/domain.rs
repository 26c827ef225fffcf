//! UI-facing models
//!
//! Flattened projections of the wire shapes. Nothing here is ambiguous:
//! missing text is an empty string, missing counts are zero, and a missing
//! image is `None`.

use super::ids::{AlbumId, ArtistId, PlaylistId, TrackId, UserId};
use super::page::Page;

/// Items that can be addressed in a list (by id) and used as an `after` cursor.
pub trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed {
    ($($ty:ty),* $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                self.id.as_str()
            }
        })*
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistRef {
    pub id: ArtistId,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub genres: Vec<String>,
    pub follower_count: u64,
    pub popularity: u32,
    pub image_url: Option<String>,
}

/// An album as listed on an artist page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistAlbum {
    pub id: AlbumId,
    pub name: String,
    pub album_type: String,
    pub release_date: String,
    pub total_tracks: u32,
    pub image_url: Option<String>,
}

/// A saved album in the user's library
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumListItem {
    pub id: AlbumId,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub release_date: String,
    pub total_tracks: u32,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumTrack {
    pub id: TrackId,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub duration_ms: u64,
    pub track_number: u32,
    pub explicit: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub album_type: String,
    pub artists: Vec<ArtistRef>,
    pub release_date: String,
    pub total_tracks: u32,
    pub label: String,
    pub popularity: u32,
    pub image_url: Option<String>,
    pub tracks: Vec<AlbumTrack>,
}

impl Album {
    /// Release year, if the date carries one.
    pub fn year(&self) -> &str {
        self.release_date.get(..4).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumRef {
    pub id: AlbumId,
    pub name: String,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub artists: Vec<ArtistRef>,
    pub album: Option<AlbumRef>,
    pub duration_ms: u64,
    pub explicit: bool,
    pub popularity: u32,
    pub image_url: Option<String>,
}

impl Track {
    /// Comma separated artist names.
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Owner {
    pub id: Option<UserId>,
    pub display_name: String,
}

/// A playlist as listed in the sidebar, on a user page, or in search results
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistListItem {
    pub id: PlaylistId,
    pub name: String,
    pub owner_name: String,
    pub total_tracks: u32,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistTrack {
    pub id: TrackId,
    pub added_at: Option<String>,
    pub track: Track,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub description: String,
    pub owner: Owner,
    pub follower_count: u64,
    pub image_url: Option<String>,
    pub total_tracks: u32,
    /// First page of tracks as embedded in the playlist object
    pub tracks: Page<PlaylistTrack>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub follower_count: u64,
    pub profile_picture_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchType {
    Track,
    Artist,
    Album,
    Playlist,
}

impl SearchType {
    pub const ALL: [SearchType; 4] = [
        SearchType::Track,
        SearchType::Artist,
        SearchType::Album,
        SearchType::Playlist,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Track => "track",
            SearchType::Artist => "artist",
            SearchType::Album => "album",
            SearchType::Playlist => "playlist",
        }
    }
}

impl std::str::FromStr for SearchType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "track" => Ok(SearchType::Track),
            "artist" => Ok(SearchType::Artist),
            "album" => Ok(SearchType::Album),
            "playlist" => Ok(SearchType::Playlist),
            other => Err(format!("unknown search type: {other}")),
        }
    }
}

/// Search matches per category. A category that was not requested, or had no
/// matches, is an empty list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub tracks: Vec<Track>,
    pub artists: Vec<Artist>,
    pub albums: Vec<ArtistAlbum>,
    pub playlists: Vec<PlaylistListItem>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
            && self.artists.is_empty()
            && self.albums.is_empty()
            && self.playlists.is_empty()
    }
}

keyed!(
    Artist,
    ArtistAlbum,
    AlbumListItem,
    AlbumTrack,
    Track,
    PlaylistListItem,
    PlaylistTrack,
);
