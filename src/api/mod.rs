use crate::{
    error::ApiResult,
    models::{CatalogPage, Movie, NewMovie, RatingActivity, Recommendation, SearchResult},
};

pub mod http;

pub use http::HttpCatalogApi;

/// Source of the bearer credential attached to catalog requests
///
/// Token acquisition, storage and decoding live outside this crate; the
/// engine only reads whatever credential is current at the moment a request
/// goes out. `None` means the request rides unauthenticated and the server
/// decides what that is allowed to see.
pub trait CredentialProvider: Send + Sync {
    fn current_token(&self) -> Option<String>;
}

/// Fixed-token credential source for tests and one-shot tools
pub struct StaticToken(pub Option<String>);

impl CredentialProvider for StaticToken {
    fn current_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Remote catalog capability
///
/// The single seam between the synchronization engine and the wire. Every
/// operation returns a typed failure from the [`crate::error::ApiError`]
/// taxonomy; none of them retries on its own. Stale-response arbitration
/// happens above this trait, so implementations stay oblivious to issuance
/// order.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of the full catalog
    async fn fetch_page(&self, page: u32, page_size: u32) -> ApiResult<CatalogPage>;

    /// Fetch movies matching a free-text query
    async fn search(&self, query: &str) -> ApiResult<SearchResult>;

    /// Submit a rating for a movie; the ack carries no body worth keeping
    async fn rate_movie(&self, movie_id: &str, score: u8) -> ApiResult<()>;

    /// Add a movie to the catalog, returning the created record
    async fn add_movie(&self, movie: &NewMovie) -> ApiResult<Movie>;

    /// Import a movie by title from OMDb, returning the imported record
    ///
    /// Servers without the feature answer 404, which surfaces as
    /// `FeatureUnavailable` rather than a validation failure.
    async fn import_by_title(&self, title: &str) -> ApiResult<Movie>;

    /// Fetch the recent rating activity feed
    async fn recent_activity(&self) -> ApiResult<Vec<RatingActivity>>;

    /// Fetch AI-generated recommendations
    async fn ai_recommendations(&self) -> ApiResult<Vec<Recommendation>>;
}
