//! Wire → domain mapping
//!
//! All functions are total. Detail mappers take the id that was requested so
//! a body without an `id` still maps; list mappers drop `null` entries and
//! entries without a usable id, keeping the relative order of the rest.

use super::domain::{
    Album, AlbumListItem, AlbumRef, AlbumTrack, Artist, ArtistAlbum, ArtistRef, Owner, Playlist,
    PlaylistListItem, PlaylistTrack, SearchResult, Track, User,
};
use super::ids::{AlbumId, ArtistId, PlaylistId, TrackId, UserId};
use super::image::preferably_medium;
use super::page::{Page, PageRequest};
use super::wire;

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn image_url(images: Option<&Vec<wire::Image>>) -> Option<String> {
    images.and_then(|images| preferably_medium(images))
}

fn follower_count(followers: Option<&wire::Followers>) -> u64 {
    followers.and_then(|f| f.total).unwrap_or(0)
}

/// Flatten a wire item list, dropping nulls and entries `map` rejects.
pub fn items<W, D>(items: wire::Items<W>, map: impl FnMut(W) -> Option<D>) -> Vec<D> {
    capped(items, None, map).items
}

/// Map at most `cap` raw entries into a page. `received` counts the entries
/// kept before mapping; a page cut by the cap always has a successor.
fn capped<W, D>(
    items: wire::Items<W>,
    cap: Option<u32>,
    map: impl FnMut(W) -> Option<D>,
) -> Page<D> {
    let mut raw = items.unwrap_or_default();
    let cut = cap.is_some_and(|cap| raw.len() > cap as usize);
    if let Some(cap) = cap {
        raw.truncate(cap as usize);
    }
    Page {
        received: raw.len() as u32,
        items: raw.into_iter().flatten().filter_map(map).collect(),
        has_next: cut,
    }
}

/// Map an offset-paged list, keeping the server's paging for the caller.
pub fn page<W, D>(
    wire: wire::Paging<W>,
    request: PageRequest,
    map: impl FnMut(W) -> Option<D>,
) -> Page<D> {
    let mapped = capped(wire.items, Some(request.limit()), map);
    let cut = mapped.has_next;
    let page = Page::new(mapped.items, mapped.received, request, wire.next.as_deref(), wire.total);
    Page {
        has_next: page.has_next || cut,
        ..page
    }
}

fn id_or<T>(id: Option<String>, fallback: &T) -> T
where
    T: TryFrom<String> + Clone,
{
    id.and_then(|id| T::try_from(id).ok())
        .unwrap_or_else(|| fallback.clone())
}

fn artist_refs(artists: Option<Vec<wire::SimplifiedArtist>>) -> Vec<ArtistRef> {
    artists
        .unwrap_or_default()
        .into_iter()
        .filter_map(artist_ref)
        .collect()
}

pub fn artist_ref(wire: wire::SimplifiedArtist) -> Option<ArtistRef> {
    Some(ArtistRef {
        id: ArtistId::new(wire.id?).ok()?,
        name: text(wire.name),
    })
}

fn artist_fields(id: ArtistId, wire: wire::Artist) -> Artist {
    Artist {
        id,
        name: text(wire.name),
        genres: wire.genres.unwrap_or_default(),
        follower_count: follower_count(wire.followers.as_ref()),
        popularity: wire.popularity.unwrap_or(0),
        image_url: image_url(wire.images.as_ref()),
    }
}

/// `GET /artists/{id}`
pub fn artist(wire: wire::Artist, requested: &ArtistId) -> Artist {
    let id = id_or(wire.id.clone(), requested);
    artist_fields(id, wire)
}

pub fn artist_item(wire: wire::Artist) -> Option<Artist> {
    let id = ArtistId::new(wire.id.clone()?).ok()?;
    Some(artist_fields(id, wire))
}

/// `GET /me/following?type=artist`. The list continues while the server
/// hands out a `next` link or an `after` cursor.
pub fn followed_artists(wire: wire::FollowedArtists, limit: Option<u32>) -> Page<Artist> {
    let paging = wire.artists.unwrap_or_default();
    let after = paging.cursors.and_then(|c| c.after);
    let page = capped(paging.items, limit, artist_item);
    let more = page.received > 0 && (paging.next.is_some() || after.is_some());
    Page {
        has_next: page.has_next || more,
        ..page
    }
}

pub fn artist_album(wire: wire::SimplifiedAlbum) -> Option<ArtistAlbum> {
    Some(ArtistAlbum {
        id: AlbumId::new(wire.id?).ok()?,
        name: text(wire.name),
        album_type: text(wire.album_type),
        release_date: text(wire.release_date),
        total_tracks: wire.total_tracks.unwrap_or(0),
        image_url: image_url(wire.images.as_ref()),
    })
}

/// `GET /artists/{id}/albums`
pub fn artist_albums(wire: wire::ArtistAlbums, request: PageRequest) -> Page<ArtistAlbum> {
    page(wire, request, artist_album)
}

pub fn album_list_item(wire: wire::SavedAlbum) -> Option<AlbumListItem> {
    let album = wire.album?;
    Some(AlbumListItem {
        id: AlbumId::new(album.id?).ok()?,
        name: text(album.name),
        artists: artist_refs(album.artists),
        release_date: text(album.release_date),
        total_tracks: album.total_tracks.unwrap_or(0),
        image_url: image_url(album.images.as_ref()),
    })
}

/// `GET /me/albums`
pub fn saved_albums(wire: wire::SavedAlbums, request: PageRequest) -> Page<AlbumListItem> {
    page(wire, request, album_list_item)
}

pub fn album_track(wire: wire::SimplifiedTrack) -> Option<AlbumTrack> {
    Some(AlbumTrack {
        id: TrackId::new(wire.id?).ok()?,
        name: text(wire.name),
        artists: artist_refs(wire.artists),
        duration_ms: wire.duration_ms.unwrap_or(0),
        track_number: wire.track_number.unwrap_or(0),
        explicit: wire.explicit.unwrap_or(false),
    })
}

/// `GET /albums/{id}`
pub fn album(wire: wire::Album, requested: &AlbumId) -> Album {
    let tracks = wire
        .tracks
        .map(|page| items(page.items, album_track))
        .unwrap_or_default();
    Album {
        id: id_or(wire.id, requested),
        name: text(wire.name),
        album_type: text(wire.album_type),
        artists: artist_refs(wire.artists),
        release_date: text(wire.release_date),
        total_tracks: wire.total_tracks.unwrap_or(tracks.len() as u32),
        label: text(wire.label),
        popularity: wire.popularity.unwrap_or(0),
        image_url: image_url(wire.images.as_ref()),
        tracks,
    }
}

fn album_ref(wire: wire::SimplifiedAlbum) -> Option<AlbumRef> {
    Some(AlbumRef {
        id: AlbumId::new(wire.id?).ok()?,
        name: text(wire.name),
        image_url: image_url(wire.images.as_ref()),
    })
}

fn track_fields(id: TrackId, wire: wire::Track) -> Track {
    let image_url = wire
        .album
        .as_ref()
        .and_then(|album| image_url(album.images.as_ref()));
    Track {
        id,
        name: text(wire.name),
        artists: artist_refs(wire.artists),
        album: wire.album.and_then(album_ref),
        duration_ms: wire.duration_ms.unwrap_or(0),
        explicit: wire.explicit.unwrap_or(false),
        popularity: wire.popularity.unwrap_or(0),
        image_url,
    }
}

/// `GET /tracks/{id}`
pub fn track(wire: wire::Track, requested: &TrackId) -> Track {
    let id = id_or(wire.id.clone(), requested);
    track_fields(id, wire)
}

/// Episodes and local files are skipped; they have no track id.
pub fn track_item(wire: wire::Track) -> Option<Track> {
    if wire.kind.as_deref().is_some_and(|kind| kind != "track") {
        return None;
    }
    let id = TrackId::new(wire.id.clone()?).ok()?;
    Some(track_fields(id, wire))
}

fn owner(wire: Option<wire::PublicUser>) -> Owner {
    let wire = wire.unwrap_or_default();
    let id = wire.id.and_then(|id| UserId::new(id).ok());
    let display_name = wire
        .display_name
        .or_else(|| id.as_ref().map(|id| id.to_string()))
        .unwrap_or_default();
    Owner { id, display_name }
}

pub fn playlist_list_item(wire: wire::SimplifiedPlaylist) -> Option<PlaylistListItem> {
    Some(PlaylistListItem {
        id: PlaylistId::new(wire.id?).ok()?,
        name: text(wire.name),
        owner_name: owner(wire.owner).display_name,
        total_tracks: wire.tracks.and_then(|t| t.total).unwrap_or(0),
        image_url: image_url(wire.images.as_ref()),
    })
}

/// `GET /me/playlists` and `GET /users/{id}/playlists`
pub fn playlists(wire: wire::Playlists, request: PageRequest) -> Page<PlaylistListItem> {
    page(wire, request, playlist_list_item)
}

pub fn playlist_track(wire: wire::PlaylistTrack) -> Option<PlaylistTrack> {
    let track = track_item(wire.track?)?;
    Some(PlaylistTrack {
        id: track.id.clone(),
        added_at: wire.added_at,
        track,
    })
}

/// `GET /playlists/{id}/tracks`
pub fn playlist_tracks(wire: wire::PlaylistTracks, request: PageRequest) -> Page<PlaylistTrack> {
    page(wire, request, playlist_track)
}

/// `GET /playlists/{id}`. The embedded track page always starts at offset 0.
pub fn playlist(wire: wire::Playlist, requested: &PlaylistId) -> Playlist {
    let embedded = wire.tracks.unwrap_or_default();
    let total = embedded.total;
    let next = embedded.next;
    let tracks = capped(embedded.items, None, playlist_track);
    let received = tracks.received;
    let has_next = received > 0 && (next.is_some() || total.is_some_and(|total| received < total));
    Playlist {
        id: id_or(wire.id, requested),
        name: text(wire.name),
        description: text(wire.description),
        owner: owner(wire.owner),
        follower_count: follower_count(wire.followers.as_ref()),
        image_url: image_url(wire.images.as_ref()),
        total_tracks: total.unwrap_or(received),
        tracks: Page { has_next, ..tracks },
    }
}

/// `GET /users/{id}` and `GET /me`
pub fn user(wire: wire::User, requested: &UserId) -> User {
    User {
        id: id_or(wire.id, requested),
        display_name: text(wire.display_name),
        follower_count: follower_count(wire.followers.as_ref()),
        profile_picture_url: image_url(wire.images.as_ref()),
    }
}

/// `GET /search`. Categories absent from the response map to empty lists.
pub fn search_result(wire: wire::SearchResponse) -> SearchResult {
    SearchResult {
        tracks: wire
            .tracks
            .map(|page| items(page.items, track_item))
            .unwrap_or_default(),
        artists: wire
            .artists
            .map(|page| items(page.items, artist_item))
            .unwrap_or_default(),
        albums: wire
            .albums
            .map(|page| items(page.items, artist_album))
            .unwrap_or_default(),
        playlists: wire
            .playlists
            .map(|page| items(page.items, playlist_list_item))
            .unwrap_or_default(),
    }
}
