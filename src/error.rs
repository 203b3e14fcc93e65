use thiserror::Error;

/// Catalog operation errors
///
/// One variant per failure class the presentation layer needs to tell
/// apart. Payloads are plain strings so errors stay `Clone` and can sit in
/// the store's per-kind error channels. Nothing here is retried
/// automatically; retry is always user-initiated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Please log in to continue")]
    AuthRequired,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Feature unavailable: {0}")]
    FeatureUnavailable(String),
}

/// Errors surfaced by the mutation coordinator
///
/// `Invalid` and `Busy` are rejected client-side, before the endpoint is
/// ever called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Another submission is already in flight")]
    Busy,

    #[error(transparent)]
    Api(#[from] ApiError),
}

pub type ApiResult<T> = Result<T, ApiError>;
