use std::sync::Arc;

use crate::error::{ApiError, Result};
use crate::model::{mapper, validate_limit, wire, SearchResult, SearchType};
use crate::{log_api_request, log_api_result};

use super::transport::HttpTransport;

#[derive(Clone)]
pub struct SearchRepo {
    transport: Arc<HttpTransport>,
}

impl SearchRepo {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }

    /// GET /search
    ///
    /// `limit` applies per category. Categories not in `types` come back empty.
    pub async fn search(
        &self,
        query: &str,
        types: &[SearchType],
        limit: Option<u32>,
    ) -> Result<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::InvalidArgument("search query must not be empty".into()));
        }
        if types.is_empty() {
            return Err(ApiError::InvalidArgument("at least one search type is required".into()));
        }
        let limit = limit.map(validate_limit).transpose()?;

        // keep the canonical order and drop duplicates
        let type_param = SearchType::ALL
            .iter()
            .filter(|t| types.contains(*t))
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");

        log_api_request!("search", query, types = %type_param, limit = ?limit);

        let mut params = vec![("q", query.to_string()), ("type", type_param)];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let result = self
            .transport
            .get::<wire::SearchResponse>(&["search"], &params)
            .await
            .map(mapper::search_result)
            .map(|mut found| {
                if let Some(limit) = limit.map(|l| l as usize) {
                    found.tracks.truncate(limit);
                    found.artists.truncate(limit);
                    found.albums.truncate(limit);
                    found.playlists.truncate(limit);
                }
                found
            });

        if let Ok(found) = &result {
            tracing::info!(
                query,
                tracks = found.tracks.len(),
                albums = found.albums.len(),
                artists = found.artists.len(),
                playlists = found.playlists.len(),
                "Search completed successfully"
            );
        }
        log_api_result!("search", result);
        result
    }
}
