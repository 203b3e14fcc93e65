pub mod arbiter;
pub mod debounce;
pub mod engine;
pub mod mutation;
pub mod store;

pub use arbiter::{FetchKind, RequestArbiter, RequestToken};
pub use debounce::{InputAction, SearchDebouncer};
pub use engine::CatalogEngine;
pub use mutation::MutationCoordinator;
pub use store::{CatalogStore, CatalogView, GenreFilter, StoreState};
