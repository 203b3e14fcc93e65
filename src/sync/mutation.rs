use std::sync::Arc;

use tokio::sync::Mutex;

use crate::api::CatalogApi;
use crate::error::MutationError;
use crate::models::{Movie, NewMovie};

use super::engine::CatalogEngine;

/// Serializes write submissions against the catalog
///
/// The endpoint has no idempotency key, so firing two submissions
/// concurrently can create duplicate catalog entries. A single guard covers
/// rate, add and import: a second submission while one is outstanding is
/// rejected with [`MutationError::Busy`] rather than queued. Each
/// successful mutation triggers a page refetch, strictly after the server's
/// acknowledgment, to resynchronize totals and ordering.
pub struct MutationCoordinator {
    api: Arc<dyn CatalogApi>,
    engine: Arc<CatalogEngine>,
    submission: Mutex<()>,
}

impl MutationCoordinator {
    pub fn new(api: Arc<dyn CatalogApi>, engine: Arc<CatalogEngine>) -> Self {
        Self {
            api,
            engine,
            submission: Mutex::new(()),
        }
    }

    /// Submits a rating, patches the view locally, then refetches
    ///
    /// The score must be 1-5 inclusive; anything else is rejected before
    /// the endpoint is called. On failure the local rating is untouched and
    /// the error propagates, `AuthRequired` distinguishable from the rest.
    pub async fn rate(&self, movie_id: &str, score: u8) -> Result<(), MutationError> {
        if !(1..=5).contains(&score) {
            return Err(MutationError::Invalid(format!(
                "Score must be between 1 and 5, got {}",
                score
            )));
        }

        {
            let _guard = self
                .submission
                .try_lock()
                .map_err(|_| MutationError::Busy)?;
            self.api.rate_movie(movie_id, score).await?;
            // Patch the view immediately; the refetch below only confirms
            self.engine.store().set_rating_locally(movie_id, score);
        }

        tracing::debug!(movie_id = %movie_id, score, "Rating acknowledged, refetching");
        self.engine.refresh().await;
        Ok(())
    }

    /// Adds a movie manually; title and genre are required
    pub async fn add_movie(&self, movie: NewMovie) -> Result<Movie, MutationError> {
        if movie.title.trim().is_empty() {
            return Err(MutationError::Invalid("Title is required".to_string()));
        }
        if movie.genre.trim().is_empty() {
            return Err(MutationError::Invalid("Genre is required".to_string()));
        }

        let created = {
            let _guard = self
                .submission
                .try_lock()
                .map_err(|_| MutationError::Busy)?;
            self.api.add_movie(&movie).await?
        };

        self.engine.refresh().await;
        Ok(created)
    }

    /// Imports a movie by title from OMDb
    ///
    /// A server without the integration answers `FeatureUnavailable`, which
    /// callers surface as guidance distinct from validation failures.
    pub async fn import_by_title(&self, title: &str) -> Result<Movie, MutationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(MutationError::Invalid("Title is required".to_string()));
        }

        let imported = {
            let _guard = self
                .submission
                .try_lock()
                .map_err(|_| MutationError::Busy)?;
            self.api.import_by_title(title).await?
        };

        self.engine.refresh().await;
        Ok(imported)
    }
}
