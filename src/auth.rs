//! Identity and token handling
//!
//! Repositories only ever see the [`TokenProvider`] trait. The concrete
//! [`SessionTokenProvider`] owns the session: it restores it from disk, runs
//! the browser login through an [`Authenticator`], refreshes expired tokens
//! and forgets everything on logout.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use rspotify::Token;
use tokio::sync::Mutex;

use crate::config::AuthConfig;
use crate::error::{ApiError, Result};

pub const SCOPES: &str =
    "user-read-private user-follow-read user-library-read playlist-read-private playlist-read-collaborative user-read-playback-state user-modify-playback-state";

const RESPONSE: &str = r#"
<!doctype html>
<html>
<head><title>Success</title></head>
<body><h1>Authentication Successful!</h1><script>window.close();</script></body>
</html>
"#;

/// Supplies the bearer token for outgoing requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current access token; `Unauthenticated` when there is no usable session.
    async fn get_token(&self) -> Result<String>;

    /// Forget the session. Calling it again is a no-op.
    async fn logout(&self) -> Result<()>;
}

/// A fixed token, e.g. one issued out of band. It is never refreshed.
pub struct StaticTokenProvider {
    token: Mutex<Option<Token>>,
}

impl StaticTokenProvider {
    pub fn new(token: Token) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }

    /// Token valid for an hour from now.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self::new(token_valid_for(access_token.into(), chrono::Duration::seconds(3600)))
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn get_token(&self) -> Result<String> {
        match self.token.lock().await.as_ref() {
            Some(token) if !token.is_expired() => Ok(token.access_token.clone()),
            _ => Err(ApiError::Unauthenticated),
        }
    }

    async fn logout(&self) -> Result<()> {
        self.token.lock().await.take();
        Ok(())
    }
}

pub(crate) fn token_valid_for(access_token: String, expires_in: chrono::Duration) -> Token {
    Token {
        access_token,
        expires_in,
        expires_at: Some(Utc::now() + expires_in),
        scopes: SCOPES
            .split_whitespace()
            .map(|s| s.to_string())
            .collect::<HashSet<String>>(),
        refresh_token: None,
    }
}

/// Interactive login and token refresh against the accounts service.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authorize(&self) -> anyhow::Result<Token>;

    async fn refresh(&self, refresh_token: &str) -> anyhow::Result<Token>;
}

/// Browser based PKCE flow through `librespot-oauth`.
pub struct LibrespotAuthenticator {
    client_id: String,
    redirect_uri: String,
    scopes: Vec<&'static str>,
}

impl LibrespotAuthenticator {
    pub fn new(config: &AuthConfig) -> Self {
        // librespot-oauth only takes 'static scope names; built once per process
        let scopes = if config.scopes.is_empty() {
            SCOPES.split_whitespace().collect()
        } else {
            config
                .scopes
                .iter()
                .map(|scope| &*Box::leak(scope.clone().into_boxed_str()))
                .collect()
        };
        Self {
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scopes,
        }
    }

    fn builder(&self) -> librespot_oauth::OAuthClientBuilder {
        librespot_oauth::OAuthClientBuilder::new(
            &self.client_id,
            &self.redirect_uri,
            self.scopes.clone(),
        )
    }
}

#[async_trait]
impl Authenticator for LibrespotAuthenticator {
    async fn authorize(&self) -> anyhow::Result<Token> {
        tracing::info!("Starting browser-based OAuth flow");
        let client = self
            .builder()
            .open_in_browser()
            .with_custom_message(RESPONSE)
            .build()
            .context("Failed to build OAuth client")?;

        let token = client
            .get_access_token_async()
            .await
            .context("Failed to get access token")?;

        tracing::info!("Browser authentication completed successfully");
        Ok(session_token(token))
    }

    async fn refresh(&self, refresh_token: &str) -> anyhow::Result<Token> {
        let client = self.builder().build().context("Failed to build OAuth client")?;
        let token = client
            .refresh_token_async(refresh_token)
            .await
            .context("Failed to refresh access token")?;
        tracing::debug!("Token refreshed successfully");
        Ok(session_token(token))
    }
}

fn session_token(token: librespot_oauth::OAuthToken) -> Token {
    let ttl = token.expires_at.saturating_duration_since(Instant::now());
    let expires_in =
        chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::seconds(3600));
    Token {
        access_token: token.access_token,
        expires_in,
        expires_at: Some(Utc::now() + expires_in),
        scopes: token.scopes.into_iter().collect(),
        refresh_token: Some(token.refresh_token),
    }
}

/// Session persisted as JSON so a restart does not need a new browser login.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<Option<Token>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session {}", self.path.display()))?;
        let token = serde_json::from_str(&content).context("Failed to parse session")?;
        Ok(Some(token))
    }

    pub fn save(&self, token: &Token) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, serde_json::to_string(token)?)?;
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Token provider backed by a persisted, refreshable session.
///
/// Refreshes are serialized: the session lock is held for the duration of a
/// refresh, so callers arriving while the token is being renewed wait and
/// then reuse the new token instead of starting their own refresh.
pub struct SessionTokenProvider<A> {
    authenticator: A,
    store: SessionStore,
    session: Mutex<Option<Token>>,
}

impl<A: Authenticator> SessionTokenProvider<A> {
    /// Restore the session from `store`. An unreadable session file is
    /// treated as no session.
    pub fn load(authenticator: A, store: SessionStore) -> Self {
        let session = match store.load() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %store.path().display(),
                    "Ignoring unreadable session"
                );
                None
            }
        };
        if session.is_some() {
            tracing::info!("Restored session from disk");
        }
        Self {
            authenticator,
            store,
            session: Mutex::new(session),
        }
    }

    pub async fn has_session(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Run the interactive login and persist the new session.
    pub async fn login(&self) -> anyhow::Result<()> {
        let token = self.authenticator.authorize().await?;
        if let Err(e) = self.store.save(&token) {
            tracing::warn!(error = %e, "Could not persist session");
        }
        *self.session.lock().await = Some(token);
        tracing::info!("Logged in");
        Ok(())
    }

    fn forget(&self, session: &mut Option<Token>) {
        *session = None;
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Could not delete session file");
        }
    }
}

#[async_trait]
impl<A: Authenticator> TokenProvider for SessionTokenProvider<A> {
    async fn get_token(&self) -> Result<String> {
        let mut session = self.session.lock().await;
        let Some(current) = session.as_ref() else {
            return Err(ApiError::Unauthenticated);
        };
        if !current.is_expired() {
            return Ok(current.access_token.clone());
        }

        let Some(refresh_token) = current.refresh_token.clone() else {
            tracing::info!("Session expired and cannot be refreshed");
            self.forget(&mut session);
            return Err(ApiError::Unauthenticated);
        };

        tracing::info!("Token expired, refreshing...");
        match self.authenticator.refresh(&refresh_token).await {
            Ok(mut fresh) => {
                if fresh.refresh_token.is_none() {
                    fresh.refresh_token = Some(refresh_token);
                }
                if let Err(e) = self.store.save(&fresh) {
                    tracing::warn!(error = %e, "Could not persist refreshed session");
                }
                let access_token = fresh.access_token.clone();
                *session = Some(fresh);
                Ok(access_token)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to refresh token");
                self.forget(&mut session);
                Err(ApiError::Unauthenticated)
            }
        }
    }

    async fn logout(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        self.forget(&mut session);
        tracing::info!("Logged out");
        Ok(())
    }
}
