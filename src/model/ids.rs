//! Typed resource identifiers
//!
//! Each resource family gets its own newtype so an album id can never be
//! passed where an artist id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub const KIND: &'static str = $kind;

            /// Fails with `InvalidArgument` for empty or blank ids.
            pub fn new(id: impl Into<String>) -> Result<Self> {
                let id = id.into();
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(ApiError::InvalidArgument(format!(
                        "{} id must not be empty",
                        $kind
                    )));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// `spotify:<kind>:<id>`
            pub fn uri(&self) -> String {
                format!("spotify:{}:{}", $kind, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ApiError;

            fn try_from(value: String) -> Result<Self> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ApiError;

            fn try_from(value: &str) -> Result<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> String {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

resource_id!(
    /// Spotify ID of an artist
    ArtistId,
    "artist"
);
resource_id!(
    /// Spotify ID of an album
    AlbumId,
    "album"
);
resource_id!(
    /// Spotify ID of a playlist
    PlaylistId,
    "playlist"
);
resource_id!(
    /// Spotify ID of a track
    TrackId,
    "track"
);
resource_id!(
    /// Spotify user name
    UserId,
    "user"
);
