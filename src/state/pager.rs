//! Paginated "load more" lists

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::error::Result;
use crate::model::{Keyed, Page, PageRequest};

use super::observable::{LoadState, Observable};
use super::scope::ScopeHandle;

/// Position for the next page: offset/limit plus the key of the last item
/// received, for cursor-paged endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageCursor {
    pub page: PageRequest,
    pub after: Option<String>,
}

pub type PageFetcher<T> =
    Arc<dyn Fn(PageCursor) -> BoxFuture<'static, Result<Page<T>>> + Send + Sync>;

/// Wrap an async page loader as a [`PageFetcher`].
pub fn page_fetcher<T, F, Fut>(fetch: F) -> PageFetcher<T>
where
    F: Fn(PageCursor) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Page<T>>> + Send + 'static,
{
    Arc::new(move |cursor: PageCursor| -> BoxFuture<'static, Result<Page<T>>> {
        fetch(cursor).boxed()
    })
}

#[derive(Debug)]
struct Position {
    next: PageCursor,
    exhausted: bool,
    // Bumped by reload so a stale in-flight page is discarded.
    generation: u64,
}

struct PagerInner<T> {
    items: Observable<LoadState<Vec<T>>>,
    loading: Observable<bool>,
    last_error: Observable<Option<String>>,
    position: Mutex<Position>,
    first_page: PageRequest,
    fetch: PageFetcher<T>,
    scope: ScopeHandle,
}

/// A list that grows one page at a time.
///
/// `items` starts `Loading`, becomes `Loaded` with the first page, and each
/// further page is appended. `loading` is true only while a fetch is in
/// flight, and gates `load_more` so a page is never requested twice.
pub struct Pager<T> {
    inner: Arc<PagerInner<T>>,
}

impl<T> Clone for Pager<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Pager<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    /// Create the pager and request the first page.
    pub fn start(scope: ScopeHandle, first_page: PageRequest, fetch: PageFetcher<T>) -> Self {
        let pager = Self::pending(scope, first_page, fetch);
        pager.load_more();
        pager
    }

    /// Create a pager already holding `items`, e.g. the first page embedded in
    /// a parent object. The next request is `next`.
    pub fn seeded(
        scope: ScopeHandle,
        items: Vec<T>,
        next: PageRequest,
        exhausted: bool,
        fetch: PageFetcher<T>,
    ) -> Self {
        let pager = Self::pending(scope, next, fetch);
        pager.seed(items, next, exhausted);
        pager
    }

    /// Create a pager that stays `Loading` until [`Pager::seed`] or
    /// [`Pager::reload`].
    pub fn pending(scope: ScopeHandle, first_page: PageRequest, fetch: PageFetcher<T>) -> Self {
        Self {
            inner: Arc::new(PagerInner {
                items: Observable::new(LoadState::Loading),
                loading: Observable::new(false),
                last_error: Observable::new(None),
                position: Mutex::new(Position {
                    next: PageCursor {
                        page: first_page,
                        after: None,
                    },
                    exhausted: false,
                    generation: 0,
                }),
                first_page,
                fetch,
                scope,
            }),
        }
    }

    /// Replace the contents with `items` fetched elsewhere. Any page still in
    /// flight is discarded.
    pub fn seed(&self, items: Vec<T>, next: PageRequest, exhausted: bool) {
        {
            let mut position = self.position();
            position.next = PageCursor {
                page: next,
                after: items.last().map(|item| item.key().to_string()),
            };
            position.exhausted = exhausted;
            position.generation += 1;
        }
        self.inner.items.set(LoadState::Loaded(items));
        self.inner.last_error.set(None);
        self.inner.loading.set(false);
    }

    fn position(&self) -> std::sync::MutexGuard<'_, Position> {
        self.inner
            .position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn items(&self) -> &Observable<LoadState<Vec<T>>> {
        &self.inner.items
    }

    pub fn loading(&self) -> &Observable<bool> {
        &self.inner.loading
    }

    /// Error of the most recent page request, cleared by the next success.
    pub fn last_error(&self) -> &Observable<Option<String>> {
        &self.inner.last_error
    }

    pub fn is_exhausted(&self) -> bool {
        self.position().exhausted
    }

    /// Request the next page. Returns false without doing anything when a
    /// page is already in flight, the server reported no further page, or
    /// the first page failed (use [`Pager::reload`]).
    pub fn load_more(&self) -> bool {
        if self.is_exhausted() || self.inner.items.with(|state| state.error().is_some()) {
            return false;
        }
        let started = self.inner.loading.update_if(|busy| {
            if *busy {
                false
            } else {
                *busy = true;
                true
            }
        });
        if !started {
            return false;
        }

        let (cursor, generation) = {
            let position = self.position();
            (position.next.clone(), position.generation)
        };
        tracing::debug!(offset = cursor.page.offset(), limit = cursor.page.limit(), "Loading page");

        let inner = self.inner.clone();
        self.inner.scope.launch(async move {
            let result = (inner.fetch)(cursor.clone()).await;
            inner.finish(generation, cursor, result);
        });
        true
    }

    /// Move to `Failed` without fetching, when whatever was to supply the
    /// contents failed first. Any page in flight is discarded; `reload`
    /// recovers.
    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.position().generation += 1;
        self.inner.items.set(LoadState::Failed(message.clone()));
        self.inner.last_error.set(Some(message));
        self.inner.loading.set(false);
    }

    /// Drop everything and start again from the first page.
    pub fn reload(&self) {
        {
            let mut position = self.position();
            position.next = PageCursor {
                page: self.inner.first_page,
                after: None,
            };
            position.exhausted = false;
            position.generation += 1;
        }
        self.inner.items.set(LoadState::Loading);
        self.inner.last_error.set(None);
        self.inner.loading.set(false);
        self.load_more();
    }
}

impl<T: Keyed> PagerInner<T> {
    fn finish(&self, generation: u64, cursor: PageCursor, result: Result<Page<T>>) {
        let current = self
            .position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .generation;
        if current != generation {
            tracing::debug!("Discarding page from before reload");
            return;
        }
        match result {
            Ok(page) => {
                let page = page.truncate(cursor.page.limit());
                let received = page.received;
                let batch = page.items;
                {
                    let mut position = self.position.lock().unwrap_or_else(PoisonError::into_inner);
                    position.exhausted = !page.has_next;
                    position.next = PageCursor {
                        page: cursor.page.next(),
                        after: batch
                            .last()
                            .map(|item| item.key().to_string())
                            .or(cursor.after),
                    };
                }
                tracing::debug!(received, kept = batch.len(), "Page loaded");
                self.items.update(|state| match state {
                    LoadState::Loaded(items) => items.extend(batch),
                    _ => *state = LoadState::Loaded(batch),
                });
                self.last_error.set(None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Page request failed");
                let message = self.scope.session().describe(&e);
                self.items.update_if(|state| {
                    if state.is_loading() {
                        *state = LoadState::Failed(message.clone());
                        true
                    } else {
                        false
                    }
                });
                self.last_error.set(Some(message));
            }
        }
        self.loading.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::state::scope::{ScreenScope, Session};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Clone, Debug, PartialEq)]
    struct Row(String);

    impl Keyed for Row {
        fn key(&self) -> &str {
            &self.0
        }
    }

    /// Serves `total` rows, counting requests. Every third row is one the
    /// mapper would have dropped when `gaps` is set.
    fn serve(total: u32, gaps: bool, calls: Arc<AtomicUsize>) -> PageFetcher<Row> {
        page_fetcher(move |cursor: PageCursor| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                let start = cursor.page.offset();
                let end = (start + cursor.page.limit()).min(total);
                let rows = (start..end)
                    .filter(|i| !gaps || i % 3 != 1)
                    .map(|i| Row(format!("row{i}")))
                    .collect();
                Ok(Page::new(rows, end.saturating_sub(start), cursor.page, None, Some(total)))
            }
        })
    }

    fn fetcher(total: u32, calls: Arc<AtomicUsize>) -> PageFetcher<Row> {
        serve(total, false, calls)
    }

    async fn settle(pager: &Pager<Row>) {
        let mut rx = pager.loading().subscribe();
        tokio::time::timeout(Duration::from_secs(2), rx.wait_for(|busy| !*busy))
            .await
            .expect("page settles")
            .unwrap();
    }

    #[tokio::test]
    async fn test_load_more_while_loading_is_noop() {
        let scope = ScreenScope::new(Session::new(|| {}));
        let calls = Arc::new(AtomicUsize::new(0));
        let first = PageRequest::first(10).unwrap();
        let pager = Pager::start(scope.handle(), first, fetcher(100, calls.clone()));

        assert!(pager.loading().get());
        assert!(!pager.load_more());
        assert!(!pager.load_more());
        settle(&pager).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(pager.items().get().loaded().map(Vec::len), Some(10));
    }

    #[tokio::test]
    async fn test_pages_append_until_exhausted() {
        let scope = ScreenScope::new(Session::new(|| {}));
        let calls = Arc::new(AtomicUsize::new(0));
        let first = PageRequest::first(10).unwrap();
        let pager = Pager::start(scope.handle(), first, fetcher(25, calls.clone()));
        settle(&pager).await;

        assert!(pager.load_more());
        settle(&pager).await;
        assert!(pager.load_more());
        settle(&pager).await;

        let items = pager.items().get();
        let items = items.loaded().unwrap();
        assert_eq!(items.len(), 25);
        assert_eq!(items[24], Row("row24".into()));
        assert!(pager.is_exhausted());

        assert!(!pager.load_more());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_first_page_failure_then_reload() {
        let scope = ScreenScope::new(Session::new(|| {}));
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();
        let fetch = page_fetcher(move |_cursor: PageCursor| {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(ApiError::RequestFailed {
                        status: Some(500),
                        cause: "boom".into(),
                    })
                } else {
                    Ok(Page::last(vec![Row("a".into())]))
                }
            }
        });

        let pager = Pager::start(scope.handle(), PageRequest::default(), fetch);
        settle(&pager).await;
        assert!(pager.items().get().error().is_some());
        assert!(!pager.load_more(), "failed list needs an explicit reload");

        pager.reload();
        settle(&pager).await;
        assert_eq!(pager.items().get(), LoadState::Loaded(vec![Row("a".into())]));
        assert_eq!(pager.last_error().get(), None);
    }

    #[tokio::test]
    async fn test_seeded_pager_continues_from_offset() {
        let scope = ScreenScope::new(Session::new(|| {}));
        let calls = Arc::new(AtomicUsize::new(0));
        let seed = (0..5).map(|i| Row(format!("row{i}"))).collect();
        let pager = Pager::seeded(
            scope.handle(),
            seed,
            PageRequest::new(5, 5).unwrap(),
            false,
            fetcher(8, calls.clone()),
        );
        assert!(!pager.loading().get());

        assert!(pager.load_more());
        settle(&pager).await;
        let items = pager.items().get();
        assert_eq!(items.loaded().unwrap().len(), 8);
        assert!(pager.is_exhausted());
    }

    #[tokio::test]
    async fn test_dropped_rows_do_not_end_the_list() {
        let scope = ScreenScope::new(Session::new(|| {}));
        let calls = Arc::new(AtomicUsize::new(0));
        let first = PageRequest::first(3).unwrap();
        let pager = Pager::start(scope.handle(), first, serve(6, true, calls.clone()));
        settle(&pager).await;

        // row1 was dropped, yet three entries arrived out of six
        assert_eq!(pager.items().get().loaded().map(Vec::len), Some(2));
        assert!(!pager.is_exhausted());

        assert!(pager.load_more());
        settle(&pager).await;
        let items = pager.items().get();
        let keys: Vec<_> = items.loaded().unwrap().iter().map(|r| r.0.as_str()).collect();
        assert_eq!(keys, vec!["row0", "row2", "row3", "row5"]);
        assert!(pager.is_exhausted());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fail_settles_a_pending_pager() {
        let scope = ScreenScope::new(Session::new(|| {}));
        let calls = Arc::new(AtomicUsize::new(0));
        let first = PageRequest::first(5).unwrap();
        let pager = Pager::pending(scope.handle(), first, fetcher(3, calls.clone()));

        pager.fail("Not found.");
        assert_eq!(pager.items().get(), LoadState::Failed("Not found.".to_string()));
        assert_eq!(pager.last_error().get().as_deref(), Some("Not found."));
        assert!(!pager.loading().get());
        assert!(!pager.load_more());

        pager.reload();
        settle(&pager).await;
        assert_eq!(pager.items().get().loaded().map(Vec::len), Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
