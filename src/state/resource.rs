//! Single-object screen state

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::Result;

use super::observable::{LoadState, Observable};
use super::scope::ScopeHandle;

type Fetch<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

struct ResourceInner<T> {
    state: Observable<LoadState<T>>,
    // True while a fetch is in flight.
    busy: Observable<bool>,
    fetch: Fetch<T>,
    scope: ScopeHandle,
}

/// One fetched object (an artist, an album, a user) in a `LoadState`.
pub struct Resource<T> {
    inner: Arc<ResourceInner<T>>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Resource<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create the resource in `Loading` and start the fetch.
    pub fn load<F, Fut>(scope: ScopeHandle, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let fetch: Fetch<T> =
            Arc::new(move || -> BoxFuture<'static, Result<T>> { fetch().boxed() });
        let resource = Self {
            inner: Arc::new(ResourceInner {
                state: Observable::new(LoadState::Loading),
                busy: Observable::new(false),
                fetch,
                scope,
            }),
        };
        resource.start();
        resource
    }

    pub fn state(&self) -> &Observable<LoadState<T>> {
        &self.inner.state
    }

    /// Fetch again. Ignored while a fetch is already running.
    pub fn reload(&self) -> bool {
        if self.inner.busy.with(|busy| *busy) {
            return false;
        }
        self.inner.state.set(LoadState::Loading);
        self.start()
    }

    fn start(&self) -> bool {
        let started = self.inner.busy.update_if(|busy| !std::mem::replace(busy, true));
        if !started {
            return false;
        }
        let inner = self.inner.clone();
        self.inner.scope.launch(async move {
            let state = match (inner.fetch)().await {
                Ok(value) => LoadState::Loaded(value),
                Err(e) => {
                    tracing::warn!(error = %e, "Load failed");
                    LoadState::Failed(inner.scope.session().describe(&e))
                }
            };
            inner.state.set(state);
            inner.busy.set(false);
        });
        true
    }
}
