use std::sync::Arc;

use crate::error::Result;
use crate::model::{mapper, validate_limit, wire, Artist, ArtistId, Page};
use crate::{log_api_request, log_api_result};

use super::transport::HttpTransport;

#[derive(Clone)]
pub struct ArtistRepo {
    transport: Arc<HttpTransport>,
}

impl ArtistRepo {
    pub const ID_TYPE: &'static str = "artist";

    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET /me/following?type=artist
    ///
    /// * `after` - the last artist id retrieved by the previous request
    /// * `limit` - 1..=50, the API defaults to 20
    pub async fn get_current_user_followed_artists(
        &self,
        after: Option<&ArtistId>,
        limit: Option<u32>,
    ) -> Result<Page<Artist>> {
        let limit = limit.map(validate_limit).transpose()?;
        log_api_request!("followed_artists", after = ?after, limit = ?limit);

        let mut query = vec![("type", Self::ID_TYPE.to_string())];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }

        let result = self
            .transport
            .get::<wire::FollowedArtists>(&["me", "following"], &query)
            .await
            .map(|artists| mapper::followed_artists(artists, limit));
        log_api_result!("followed_artists", result);
        result
    }

    /// GET /artists/{id}
    pub async fn get(&self, id: &ArtistId) -> Result<Artist> {
        log_api_request!("artist", id = %id);
        let result = self
            .transport
            .get::<wire::Artist>(&["artists", id.as_str()], &[])
            .await
            .map(|artist| mapper::artist(artist, id));
        log_api_result!("artist", result);
        result
    }
}
