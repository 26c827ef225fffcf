//! Screen lifecycles and session expiry

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;

/// Tracks whether the session ended and tells the host application once.
///
/// The hook is the external logout collaborator: typically it clears the
/// token provider and shows the login flow. It runs the first time any screen
/// sees `Unauthenticated`, and not again until [`Session::renew`].
#[derive(Clone)]
pub struct Session {
    on_expired: Arc<dyn Fn() + Send + Sync>,
    expired: Arc<AtomicBool>,
}

impl Session {
    pub fn new(on_expired: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            on_expired: Arc::new(on_expired),
            expired: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::SeqCst)
    }

    pub fn expire(&self) {
        if !self.expired.swap(true, Ordering::SeqCst) {
            tracing::warn!("Session expired, requesting logout");
            (self.on_expired)();
        }
    }

    /// Call after a new login.
    pub fn renew(&self) {
        self.expired.store(false, Ordering::SeqCst);
    }

    /// Message for a failed state; expires the session on `Unauthenticated`.
    pub fn describe(&self, error: &ApiError) -> String {
        if matches!(error, ApiError::Unauthenticated) {
            self.expire();
        }
        error.user_message()
    }
}

/// Cloneable handle used to launch work tied to a screen.
#[derive(Clone)]
pub struct ScopeHandle {
    token: CancellationToken,
    session: Session,
}

impl ScopeHandle {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A handle cancelled with this scope or on its own.
    pub fn child(&self) -> ScopeHandle {
        ScopeHandle {
            token: self.token.child_token(),
            session: self.session.clone(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Spawn `fut` on the runtime. If the scope is cancelled first the future
    /// is dropped where it stands and publishes nothing.
    pub fn launch<F>(&self, fut: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => tracing::debug!("Screen task cancelled"),
                _ = fut => {}
            }
        })
    }
}

/// Owns the lifecycle of one screen. Dropping it cancels everything the
/// screen launched.
pub struct ScreenScope {
    handle: ScopeHandle,
}

impl ScreenScope {
    pub fn new(session: Session) -> Self {
        Self {
            handle: ScopeHandle {
                token: CancellationToken::new(),
                session,
            },
        }
    }

    pub fn handle(&self) -> ScopeHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}
