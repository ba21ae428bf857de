//! Session page navigation.

use raed_core::error::{RaedError, Result};
use raed_core::presentation::PresentationIntent;
use raed_core::state::{KeyValueStore, LAST_PAGE_KEY, Page};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Tracks the active page and persists it under [`LAST_PAGE_KEY`].
///
/// Every page is reachable from every other page. The navigator never draws
/// anything itself; activating a page returns the intents the presentation
/// layer should carry out.
pub struct SessionNavigator {
    store: Arc<dyn KeyValueStore>,
    current: RwLock<Page>,
}

impl SessionNavigator {
    /// Creates a navigator sitting on [`Page::Home`].
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            current: RwLock::new(Page::default()),
        }
    }

    pub async fn current(&self) -> Page {
        *self.current.read().await
    }

    /// Activates the page named `page_id`.
    ///
    /// # Errors
    ///
    /// Returns `Navigation` for an id outside the page set. The current page
    /// stays as it was.
    pub async fn activate(&self, page_id: &str) -> Result<Vec<PresentationIntent>> {
        let Some(page) = Page::parse(page_id) else {
            tracing::warn!(target: "navigator", "Unknown page '{}'", page_id);
            return Err(RaedError::navigation(page_id));
        };
        Ok(self.activate_page(page).await)
    }

    /// Activates a page known to be valid.
    pub async fn activate_page(&self, page: Page) -> Vec<PresentationIntent> {
        *self.current.write().await = page;
        self.persist(page);
        tracing::debug!(target: "navigator", %page, "Page activated");

        let mut intents = vec![
            PresentationIntent::UpdateTitle {
                page,
                title: page.title().to_string(),
            },
            PresentationIntent::ScrollToTop,
        ];
        if page == Page::Results {
            intents.push(PresentationIntent::RenderRecordList);
        }
        intents
    }

    /// Re-activates the page persisted by an earlier session, or
    /// [`Page::Home`] when nothing usable is stored.
    pub async fn restore_last_page(&self) -> Vec<PresentationIntent> {
        let page = self.read_last_page().unwrap_or_default();
        self.activate_page(page).await
    }

    /// Activates `target` after `delay` unless the returned handle is
    /// cancelled first.
    pub fn schedule(self: &Arc<Self>, target: Page, delay: Duration) -> ScheduledNavigation {
        let token = CancellationToken::new();
        let navigator = Arc::clone(self);
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {
                    tracing::debug!(target: "navigator", %target, "Scheduled navigation cancelled");
                    None
                }
                _ = tokio::time::sleep(delay) => Some(navigator.activate_page(target).await),
            }
        });

        ScheduledNavigation {
            target,
            token,
            handle,
        }
    }

    fn read_last_page(&self) -> Option<Page> {
        let raw = match self.store.get(LAST_PAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(target: "navigator", "Failed to read last page: {}", e);
                return None;
            }
        };

        // Older sessions stored the bare id rather than a JSON string
        let page_id = serde_json::from_str::<String>(&raw).unwrap_or_else(|_| raw.trim().to_string());
        let page = Page::parse(&page_id);
        if page.is_none() {
            tracing::warn!(target: "navigator", "Ignoring stored page '{}'", page_id);
        }
        page
    }

    fn persist(&self, page: Page) {
        let result = serde_json::to_string(&page)
            .map_err(RaedError::from)
            .and_then(|json| self.store.set(LAST_PAGE_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(target: "navigator", "Failed to persist page: {}", e);
        }
    }
}

/// Handle to a pending, delayed page activation.
///
/// Dropping the handle does not cancel the navigation.
#[derive(Debug)]
pub struct ScheduledNavigation {
    target: Page,
    token: CancellationToken,
    handle: JoinHandle<Option<Vec<PresentationIntent>>>,
}

impl ScheduledNavigation {
    pub fn target(&self) -> Page {
        self.target
    }

    /// Stops the navigation if it has not happened yet.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits for the navigation and returns its intents, or `None` if it was
    /// cancelled.
    pub async fn wait(self) -> Option<Vec<PresentationIntent>> {
        match self.handle.await {
            Ok(intents) => intents,
            Err(e) => {
                tracing::warn!(target: "navigator", "Scheduled navigation task failed: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockStore;

    fn navigator() -> (Arc<MockStore>, Arc<SessionNavigator>) {
        let store = Arc::new(MockStore::new());
        let navigator = Arc::new(SessionNavigator::new(store.clone()));
        (store, navigator)
    }

    #[tokio::test]
    async fn test_activate_persists_and_emits_intents() {
        let (store, navigator) = navigator();

        let intents = navigator.activate("writing").await.unwrap();

        assert_eq!(navigator.current().await, Page::Writing);
        assert_eq!(store.raw(LAST_PAGE_KEY).as_deref(), Some("\"writing\""));
        assert_eq!(
            intents,
            vec![
                PresentationIntent::UpdateTitle {
                    page: Page::Writing,
                    title: "Raed - Writing Diagnosis".to_string(),
                },
                PresentationIntent::ScrollToTop,
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_page_leaves_state_unchanged() {
        let (store, navigator) = navigator();
        navigator.activate("sales").await.unwrap();

        let err = navigator.activate("bogus-page").await.unwrap_err();

        assert!(err.is_navigation());
        assert_eq!(navigator.current().await, Page::Sales);
        assert_eq!(store.raw(LAST_PAGE_KEY).as_deref(), Some("\"sales\""));
    }

    #[tokio::test]
    async fn test_restore_without_stored_page_is_home() {
        let (_store, navigator) = navigator();
        navigator.restore_last_page().await;
        assert_eq!(navigator.current().await, Page::Home);
    }

    #[tokio::test]
    async fn test_restore_reads_stored_page() {
        let (store, navigator) = navigator();
        store.put(LAST_PAGE_KEY, "\"results\"");

        let intents = navigator.restore_last_page().await;

        assert_eq!(navigator.current().await, Page::Results);
        assert!(intents.contains(&PresentationIntent::RenderRecordList));
    }

    #[tokio::test]
    async fn test_restore_accepts_bare_page_id() {
        let (store, navigator) = navigator();
        store.put(LAST_PAGE_KEY, "social");
        navigator.restore_last_page().await;
        assert_eq!(navigator.current().await, Page::Social);
    }

    #[tokio::test]
    async fn test_restore_ignores_invalid_or_unreadable_state() {
        let (store, navigator) = navigator();
        navigator.activate_page(Page::Sales).await;
        store.put(LAST_PAGE_KEY, "\"dashboard\"");
        navigator.restore_last_page().await;
        assert_eq!(navigator.current().await, Page::Home);

        store.fail_reads(true);
        navigator.activate_page(Page::Time).await;
        navigator.restore_last_page().await;
        assert_eq!(navigator.current().await, Page::Home);
    }

    #[tokio::test]
    async fn test_persist_failure_still_navigates() {
        let (store, navigator) = navigator();
        store.fail_writes(true);

        navigator.activate("time").await.unwrap();

        assert_eq!(navigator.current().await, Page::Time);
        assert!(store.raw(LAST_PAGE_KEY).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scheduled_navigation_fires_after_delay() {
        let (_store, navigator) = navigator();
        navigator.activate_page(Page::Time).await;

        let scheduled = navigator.schedule(Page::Results, Duration::from_secs(3));
        tokio::time::sleep(Duration::from_millis(2_999)).await;
        assert_eq!(navigator.current().await, Page::Time);

        let intents = scheduled.wait().await.unwrap();
        assert_eq!(navigator.current().await, Page::Results);
        assert!(intents.contains(&PresentationIntent::ScrollToTop));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_navigation_never_fires() {
        let (_store, navigator) = navigator();
        navigator.activate_page(Page::Time).await;

        let scheduled = navigator.schedule(Page::Results, Duration::from_secs(3));
        scheduled.cancel();
        assert!(scheduled.is_cancelled());

        assert!(scheduled.wait().await.is_none());
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(navigator.current().await, Page::Time);
    }
}
