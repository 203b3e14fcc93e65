use tokio::sync::watch;

use crate::error::ApiError;
use crate::models::{CatalogPage, Movie, SearchResult};

use super::arbiter::{FetchKind, RequestArbiter, RequestToken};

/// Genre projection applied to the current view
///
/// Purely client-side; never sent to the remote endpoint. Matching is
/// exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreFilter {
    All,
    Genre(String),
}

/// What the catalog currently resolves to
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogView {
    /// Nothing fetched yet
    #[default]
    Empty,
    Page(CatalogPage),
    Search(SearchResult),
}

impl CatalogView {
    pub fn movies(&self) -> &[Movie] {
        match self {
            CatalogView::Empty => &[],
            CatalogView::Page(page) => &page.movies,
            CatalogView::Search(result) => &result.movies,
        }
    }

    fn movies_mut(&mut self) -> &mut [Movie] {
        match self {
            CatalogView::Empty => &mut [],
            CatalogView::Page(page) => &mut page.movies,
            CatalogView::Search(result) => &mut result.movies,
        }
    }

    /// Total matching count reported by whichever fetch produced this view
    pub fn total(&self) -> u64 {
        match self {
            CatalogView::Empty => 0,
            CatalogView::Page(page) => page.total,
            CatalogView::Search(result) => result.total,
        }
    }
}

/// Per-kind fetch status
#[derive(Debug, Clone, Default)]
struct FetchChannel {
    loading: bool,
    error: Option<ApiError>,
}

/// Observable store state
///
/// Snapshots of this are what subscribers see on every change.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    view: CatalogView,
    page: FetchChannel,
    search: FetchChannel,
}

impl StoreState {
    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn is_loading(&self, kind: FetchKind) -> bool {
        self.channel(kind).loading
    }

    pub fn error(&self, kind: FetchKind) -> Option<&ApiError> {
        self.channel(kind).error.as_ref()
    }

    fn channel(&self, kind: FetchKind) -> &FetchChannel {
        match kind {
            FetchKind::Page => &self.page,
            FetchKind::Search => &self.search,
        }
    }

    fn channel_mut(&mut self, kind: FetchKind) -> &mut FetchChannel {
        match kind {
            FetchKind::Page => &mut self.page,
            FetchKind::Search => &mut self.search,
        }
    }
}

/// Authoritative in-memory catalog state
///
/// The only writers are the fetch-resolution path and
/// [`CatalogStore::set_rating_locally`]; everything else reads. Page and
/// search fetches carry independent loading flags and error channels, so a
/// slow search never blanks the page view or vice versa. The current view
/// is replaced wholesale on every successful, non-superseded fetch, never
/// merged or patched in place.
///
/// All fetch results route through the owned [`RequestArbiter`]: a result
/// whose token has been superseded is dropped without touching state and
/// without raising an error.
pub struct CatalogStore {
    state: watch::Sender<StoreState>,
    arbiter: RequestArbiter,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            state,
            arbiter: RequestArbiter::new(),
        }
    }

    /// Subscription point for presentation layers
    ///
    /// Observers receive a state snapshot on every change instead of
    /// relying on any implicit re-render trigger.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    /// Issues a fetch token and marks its kind as loading
    ///
    /// The returned token must accompany the eventual result so the
    /// arbiter can tell whether it is still the latest of its kind.
    pub fn begin_fetch(&self, kind: FetchKind) -> RequestToken {
        let token = self.arbiter.issue(kind);
        self.state.send_modify(|state| {
            state.channel_mut(kind).loading = true;
        });
        token
    }

    /// Applies a page-fetch outcome; false when the token was superseded
    pub fn apply_page(&self, token: RequestToken, outcome: Result<CatalogPage, ApiError>) -> bool {
        debug_assert_eq!(token.kind(), FetchKind::Page);
        self.apply(token, outcome.map(CatalogView::Page))
    }

    /// Applies a search-fetch outcome; false when the token was superseded
    pub fn apply_search(
        &self,
        token: RequestToken,
        outcome: Result<SearchResult, ApiError>,
    ) -> bool {
        debug_assert_eq!(token.kind(), FetchKind::Search);
        self.apply(token, outcome.map(CatalogView::Search))
    }

    fn apply(&self, token: RequestToken, outcome: Result<CatalogView, ApiError>) -> bool {
        self.state.send_if_modified(|state| {
            if !self.arbiter.is_current(token) {
                // A newer request of this kind owns the view now; the
                // in-flight flag stays with that request.
                tracing::debug!(kind = ?token.kind(), seq = token.seq(), "Stale response discarded");
                return false;
            }

            let channel = state.channel_mut(token.kind());
            channel.loading = false;
            match outcome {
                Ok(view) => {
                    channel.error = None;
                    state.view = view;
                }
                Err(error) => {
                    // The stale view stays on screen; only this kind's
                    // error channel records the failure.
                    channel.error = Some(error);
                }
            }
            true
        })
    }

    pub fn current_view(&self) -> CatalogView {
        self.state.borrow().view.clone()
    }

    /// Total matching count of the last applied fetch, page or search
    pub fn total(&self) -> u64 {
        self.state.borrow().view.total()
    }

    pub fn is_loading(&self, kind: FetchKind) -> bool {
        self.state.borrow().is_loading(kind)
    }

    pub fn error(&self, kind: FetchKind) -> Option<ApiError> {
        self.state.borrow().error(kind).cloned()
    }

    /// Pure projection of the current view through a genre filter
    pub fn filtered_view(&self, filter: &GenreFilter) -> Vec<Movie> {
        let state = self.state.borrow();
        match filter {
            GenreFilter::All => state.view.movies().to_vec(),
            GenreFilter::Genre(genre) => state
                .view
                .movies()
                .iter()
                .filter(|movie| movie.genre == *genre)
                .cloned()
                .collect(),
        }
    }

    /// Distinct genres of the current view, in fetch order
    pub fn genres(&self) -> Vec<String> {
        let state = self.state.borrow();
        let mut genres: Vec<String> = Vec::new();
        for movie in state.view.movies() {
            if !genres.contains(&movie.genre) {
                genres.push(movie.genre.clone());
            }
        }
        genres
    }

    /// Patches one movie's rating in place after a successful submission
    ///
    /// Ordering, totals and every other field are untouched. Returns false
    /// when the movie is not in the current view.
    pub fn set_rating_locally(&self, movie_id: &str, rating: u8) -> bool {
        self.state.send_if_modified(|state| {
            match state
                .view
                .movies_mut()
                .iter_mut()
                .find(|movie| movie.id == movie_id)
            {
                Some(movie) => {
                    movie.user_rating = Some(rating);
                    true
                }
                None => false,
            }
        })
    }
}
