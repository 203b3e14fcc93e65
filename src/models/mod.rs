use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single catalog entry
///
/// Immutable once fetched except `user_rating`, which is patched in place
/// after a successful rating submission. `release_date` stays an opaque
/// string because manually-added movies and OMDb imports arrive in
/// different date formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Opaque, stable identifier assigned by the server
    pub id: String,
    pub title: String,
    /// Single genre label
    pub genre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    /// The current user's rating, 1-5, absent when unrated
    #[serde(default)]
    pub user_rating: Option<u8>,
}

/// One page of the full catalog
///
/// Invariant: `movies.len() <= page_size`; the list is empty only when
/// `total == 0` or the page index exceeds the page count.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub movies: Vec<Movie>,
    /// Total matching count across the whole catalog
    pub total: u64,
    /// 1-based page index that produced this page
    pub page: u32,
    pub page_size: u32,
}

/// Result of a free-text search
///
/// Same shape as [`CatalogPage`] but addressed by query; `total` counts
/// matches for that query, not the full catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub movies: Vec<Movie>,
    pub total: u64,
    pub query: String,
}

/// Fields for a manual catalog addition
///
/// Title and genre are required; the rest is optional. The release date is
/// typed on the way out (the add form is a date picker) even though fetched
/// movies carry it as an opaque string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

/// One entry of the recent-activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingActivity {
    /// Movie title
    pub movie: String,
    pub rating: u8,
    /// Server-formatted date; empty when reconstructed client-side
    #[serde(default)]
    pub date: String,
}

/// Aggregate viewing statistics over a fetched collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Count of movies carrying a rating
    pub movies_watched: usize,
    /// Mean of present ratings to one decimal place, "0" when none
    pub average_rating: String,
    /// Distinct genres among rated movies
    pub genres_explored: usize,
    /// First distinct genre encountered in fetch order
    pub favorite_genre: Option<String>,
    /// Title of the first rated movie in fetch order
    pub last_rated: Option<String>,
}

/// A single AI-generated recommendation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub movie: Movie,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub algorithm: String,
    #[serde(default)]
    pub confidence: f64,
}

// ============================================================================
// Wire Types
// ============================================================================

/// Raw list payload returned by the page and search endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct MovieListResponse {
    pub movies: Vec<Movie>,
    #[serde(default)]
    pub total: u64,
}

/// Body of POST /api/movies/rate
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRequest {
    pub movie_id: String,
    pub score: u8,
}

/// Body of POST /api/movies/import-from-omdb
#[derive(Debug, Serialize)]
pub struct ImportRequest {
    pub title: String,
}

/// Payload of the AI recommendations endpoint
#[derive(Debug, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Error body the service attaches to non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
