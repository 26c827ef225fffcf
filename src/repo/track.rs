use std::sync::Arc;

use crate::error::Result;
use crate::model::{mapper, wire, Track, TrackId};
use crate::{log_api_request, log_api_result};

use super::transport::HttpTransport;

#[derive(Clone)]
pub struct TrackRepo {
    transport: Arc<HttpTransport>,
}

impl TrackRepo {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET /tracks/{id}
    pub async fn get_track(&self, id: &TrackId) -> Result<Track> {
        log_api_request!("track", id = %id);
        let result = self
            .transport
            .get::<wire::Track>(&["tracks", id.as_str()], &[])
            .await
            .map(|track| mapper::track(track, id));
        log_api_result!("track", result);
        result
    }
}
