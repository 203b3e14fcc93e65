//! Client-side catalog synchronization engine for a movie-rating service.
//!
//! Reconciles three concurrent input streams (free-text search, page
//! navigation and write mutations) into one consistent catalog view.
//! Keystrokes are debounced ([`sync::SearchDebouncer`]), every fetch is
//! sequenced so a stale reply can never overwrite a fresher one
//! ([`sync::RequestArbiter`]), the resulting view lives in an observable
//! store ([`sync::CatalogStore`]), and write submissions are serialized
//! with a post-acknowledgment refetch ([`sync::MutationCoordinator`]).
//! The wire is reached through the [`api::CatalogApi`] seam, with the
//! bearer credential injected via [`api::CredentialProvider`].

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod stats;
pub mod sync;

pub use api::{CatalogApi, CredentialProvider, HttpCatalogApi, StaticToken};
pub use config::Config;
pub use error::{ApiError, ApiResult, MutationError};
pub use sync::{
    CatalogEngine, CatalogStore, CatalogView, FetchKind, GenreFilter, MutationCoordinator,
    SearchDebouncer,
};
