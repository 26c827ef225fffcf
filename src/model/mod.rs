//! Model module - identifiers, wire shapes and UI-facing types
//!
//! - `ids`: typed resource identifiers
//! - `page`: offset/limit page requests and mapped pages
//! - `wire`: Web API JSON shapes, every field optional
//! - `domain`: flattened models handed to state containers
//! - `image`: medium image selection
//! - `mapper`: total wire → domain functions

mod domain;
mod ids;
mod image;
pub mod mapper;
mod page;
pub mod wire;

pub use domain::{
    Album, AlbumListItem, AlbumRef, AlbumTrack, Artist, ArtistAlbum, ArtistRef, Keyed, Owner,
    Playlist, PlaylistListItem, PlaylistTrack, SearchResult, SearchType, Track, User,
};
pub use ids::{AlbumId, ArtistId, PlaylistId, TrackId, UserId};
pub use image::{preferably_medium, MAX_SIZE, TARGET_SIZE};
pub use page::{
    validate_limit, Page, PageRequest, DEFAULT_LIMIT, MAX_LIMIT, MAX_OFFSET, MIN_LIMIT,
};
