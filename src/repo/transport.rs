//! Shared HTTP transport for every repository.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::TokenProvider;
use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::model::wire::ErrorResponse;

/// One `reqwest::Client` bound to the API base url and the token provider.
///
/// Every request asks the provider for a token, so a token rotated mid
/// session is picked up by the next call.
pub struct HttpTransport {
    http: Client,
    base_url: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(format!("spotify-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::network)?;

        Ok(Self {
            http,
            base_url,
            tokens,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenProvider> {
        &self.tokens
    }

    /// The base url with `segments` appended. Each segment is percent-encoded
    /// on its own, so an id can never add a path level, a query or a fragment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::InvalidArgument(format!("base url has no path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `GET <base>/<segments>?<query>` and decode the JSON body.
    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(segments)?;
        let request = self.http.request(Method::GET, url.clone()).query(query);
        let response = self.send(request).await?;

        let bytes = response.bytes().await.map_err(ApiError::network)?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::debug!(url = %url, error = %e, "Response did not match the expected shape");
            ApiError::DecodeFailed(e.to_string())
        })
    }

    /// `PUT <base>/<segments>` with an optional JSON body; the response body
    /// is ignored.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<()> {
        let mut request = self.http.request(Method::PUT, self.url(segments)?);
        request = match body {
            Some(body) => request.json(body),
            None => request.header(reqwest::header::CONTENT_LENGTH, 0),
        };
        self.send(request).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let token = self.tokens.get_token().await?;

        let response = request
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = response.status();
        tracing::trace!(url = %response.url(), status = status.as_u16(), "HTTP response");

        if status.is_success() {
            Ok(response)
        } else if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthenticated)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::RequestFailed {
                status: Some(status.as_u16()),
                cause: error_message(status, &body),
            })
        }
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(ApiError::InvalidArgument(format!(
            "base url must start with http:// or https://, got {raw:?}"
        )));
    }
    // Url::join replaces the last segment unless the base ends with a slash
    let with_slash = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&with_slash).map_err(|e| ApiError::InvalidArgument(format!("invalid base url: {e}")))
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string())
}
