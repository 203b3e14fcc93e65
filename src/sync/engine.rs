use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Weak};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::api::CatalogApi;
use crate::config::Config;

use super::arbiter::FetchKind;
use super::debounce::{InputAction, SearchDebouncer};
use super::store::CatalogStore;

struct DebounceDriver {
    machine: SearchDebouncer,
    timer: Option<JoinHandle<()>>,
}

/// Wires the endpoint, store and debouncer into one fetch path
///
/// All reads funnel through here: keystrokes feed the debouncer, page
/// navigation clamps to the catalog's page count, and every fetch resolves
/// through the store's arbiter so late replies of a superseded request
/// never reach the view. Fetch failures land in the store's per-kind error
/// channel; nothing is retried automatically.
pub struct CatalogEngine {
    api: Arc<dyn CatalogApi>,
    store: CatalogStore,
    debounce: Mutex<DebounceDriver>,
    page: AtomicU32,
    page_size: u32,
    // Handle for the timer task to find its way back; Weak so an armed
    // timer never keeps a torn-down engine alive
    weak: Weak<CatalogEngine>,
}

impl CatalogEngine {
    pub fn new(api: Arc<dyn CatalogApi>, config: &Config) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            api,
            store: CatalogStore::new(),
            debounce: Mutex::new(DebounceDriver {
                machine: SearchDebouncer::new(config.search_debounce()),
                timer: None,
            }),
            page: AtomicU32::new(1),
            page_size: config.page_size.max(1),
            weak: weak.clone(),
        })
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// 1-based index of the page the view currently tracks
    pub fn current_page(&self) -> u32 {
        self.page.load(Ordering::SeqCst)
    }

    /// Page count implied by the last applied fetch's total
    pub fn page_count(&self) -> u64 {
        self.store.total().div_ceil(u64::from(self.page_size))
    }

    /// Fetches one catalog page and resolves it through the arbiter
    pub async fn fetch_page(&self, page: u32) {
        self.page.store(page, Ordering::SeqCst);
        let token = self.store.begin_fetch(FetchKind::Page);
        let outcome = self.api.fetch_page(page, self.page_size).await;
        if let Err(error) = &outcome {
            tracing::warn!(error = %error, page, "Catalog page fetch failed");
        }
        self.store.apply_page(token, outcome);
    }

    /// Dispatches a search fetch and resolves it through the arbiter
    pub async fn search(&self, query: String) {
        let token = self.store.begin_fetch(FetchKind::Search);
        let outcome = self.api.search(&query).await;
        if let Err(error) = &outcome {
            tracing::warn!(error = %error, query = %query, "Search fetch failed");
        }
        self.store.apply_search(token, outcome);
    }

    /// Refetches the current page
    pub async fn refresh(&self) {
        self.fetch_page(self.current_page()).await;
    }

    /// Advances one page; no-op past the last page
    pub async fn next_page(&self) -> bool {
        let page = self.current_page();
        if u64::from(page) >= self.page_count() {
            return false;
        }
        self.fetch_page(page + 1).await;
        true
    }

    /// Goes back one page; no-op at the first page
    pub async fn prev_page(&self) -> bool {
        let page = self.current_page();
        if page <= 1 {
            return false;
        }
        self.fetch_page(page - 1).await;
        true
    }

    /// Feeds one raw search-box update
    ///
    /// Empty text cancels any pending debounced search and refetches the
    /// catalog immediately. Non-empty text (re)arms the quiet-period timer
    /// and aborts the superseded timer task; when the timer elapses
    /// undisturbed, exactly one search fires, carrying the latest text.
    pub async fn on_search_input(&self, text: &str) {
        let mut driver = self.debounce.lock().await;
        match driver.machine.on_input(Instant::now(), text) {
            InputAction::FetchCatalog => {
                if let Some(timer) = driver.timer.take() {
                    timer.abort();
                }
                drop(driver);
                self.refresh().await;
            }
            InputAction::Armed(deadline) => {
                if let Some(timer) = driver.timer.take() {
                    timer.abort();
                }
                let weak = self.weak.clone();
                driver.timer = Some(tokio::spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    if let Some(engine) = weak.upgrade() {
                        engine.fire_search().await;
                    }
                }));
            }
        }
    }

    async fn fire_search(&self) {
        let fired = {
            let mut driver = self.debounce.lock().await;
            driver.machine.fire(Instant::now())
        };
        // A wake-up whose deadline was superseded fires nothing
        if let Some(query) = fired {
            self.search(query).await;
        }
    }

    /// Cancels the debounce timer so nothing dispatches after teardown
    pub async fn shutdown(&self) {
        let mut driver = self.debounce.lock().await;
        driver.machine.cancel();
        if let Some(timer) = driver.timer.take() {
            timer.abort();
        }
    }
}
