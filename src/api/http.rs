/// HTTP implementation of the catalog capability
///
/// Thin adapter over the movie service's REST surface. Attaches the bearer
/// credential (when one is current) and a fresh `x-request-id` correlation
/// header to every outbound request, and maps response statuses into the
/// client error taxonomy: 401 becomes `AuthRequired`, other 4xx become
/// `Validation` with the server's message verbatim, transport failures and
/// 5xx become `Network`. The import endpoint treats 404 specially, as the
/// server's way of saying the feature is not deployed.
use std::sync::Arc;

use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use uuid::Uuid;

use crate::{
    api::{CatalogApi, CredentialProvider},
    config::Config,
    error::{ApiError, ApiResult},
    models::{
        CatalogPage, ErrorBody, ImportRequest, Movie, MovieListResponse, NewMovie, RateRequest,
        RatingActivity, Recommendation, RecommendationsResponse, SearchResult,
    },
};

/// Correlation header attached to every outbound request
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct HttpCatalogApi {
    http_client: HttpClient,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpCatalogApi {
    pub fn new(config: &Config, credentials: Arc<dyn CredentialProvider>) -> anyhow::Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    /// Builds a request with the correlation header and current credential
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http_client
            .request(method, &url)
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());

        if let Some(token) = self.credentials.current_token() {
            request = request.bearer_auth(token);
        }

        request
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(response).await
    }

    async fn ensure_success(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        tracing::warn!(status = %status, message = %message, "Catalog request failed");
        Err(classify_status(status, message))
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to parse response: {}", e)))
    }
}

/// Extracts the server's error message, falling back to the raw body or status
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body.to_string()
            }
        })
}

/// Maps a non-2xx status into the error taxonomy
fn classify_status(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::AuthRequired;
    }
    if status.is_client_error() {
        return ApiError::Validation(message);
    }
    ApiError::Network(format!("Server returned status {}: {}", status, message))
}

#[async_trait::async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn fetch_page(&self, page: u32, page_size: u32) -> ApiResult<CatalogPage> {
        let request = self.request(Method::GET, "/api/movies").query(&[
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ]);

        let response = self.send(request).await?;
        let list: MovieListResponse = Self::decode(response).await?;

        tracing::debug!(
            page,
            page_size,
            results = list.movies.len(),
            total = list.total,
            "Catalog page fetched"
        );

        Ok(CatalogPage {
            movies: list.movies,
            total: list.total,
            page,
            page_size,
        })
    }

    async fn search(&self, query: &str) -> ApiResult<SearchResult> {
        let request = self
            .request(Method::GET, "/api/movies/search")
            .query(&[("q", query)]);

        let response = self.send(request).await?;
        let list: MovieListResponse = Self::decode(response).await?;

        tracing::debug!(
            query = %query,
            results = list.movies.len(),
            total = list.total,
            "Search completed"
        );

        Ok(SearchResult {
            movies: list.movies,
            total: list.total,
            query: query.to_string(),
        })
    }

    async fn rate_movie(&self, movie_id: &str, score: u8) -> ApiResult<()> {
        let request = self
            .request(Method::POST, "/api/movies/rate")
            .json(&RateRequest {
                movie_id: movie_id.to_string(),
                score,
            });

        self.send(request).await?;

        tracing::info!(movie_id = %movie_id, score, "Rating submitted");

        Ok(())
    }

    async fn add_movie(&self, movie: &NewMovie) -> ApiResult<Movie> {
        let request = self.request(Method::POST, "/api/movies/add").json(movie);

        let response = self.send(request).await?;
        let created: Movie = Self::decode(response).await?;

        tracing::info!(id = %created.id, title = %created.title, "Movie added");

        Ok(created)
    }

    async fn import_by_title(&self, title: &str) -> ApiResult<Movie> {
        let request = self
            .request(Method::POST, "/api/movies/import-from-omdb")
            .json(&ImportRequest {
                title: title.to_string(),
            });

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        // The service answers 404 when the OMDb integration is not deployed
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::FeatureUnavailable(
                "Import from OMDb is not available on this server; add the movie manually"
                    .to_string(),
            ));
        }

        let response = Self::ensure_success(response).await?;
        let imported: Movie = Self::decode(response).await?;

        tracing::info!(id = %imported.id, title = %imported.title, "Movie imported");

        Ok(imported)
    }

    async fn recent_activity(&self) -> ApiResult<Vec<RatingActivity>> {
        let request = self.request(Method::GET, "/api/movies/recent-activity");

        let response = self.send(request).await?;
        Self::decode(response).await
    }

    async fn ai_recommendations(&self) -> ApiResult<Vec<Recommendation>> {
        let request = self.request(Method::GET, "/api/movies/recommendations/ai");

        let response = self.send(request).await?;
        let payload: RecommendationsResponse = Self::decode(response).await?;

        tracing::debug!(results = payload.recommendations.len(), "Recommendations fetched");

        Ok(payload.recommendations)
    }
}
