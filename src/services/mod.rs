pub mod auth;
pub mod catalog;
pub mod catalog_search;
pub mod movies;
pub mod normalize;
pub mod storage;
pub mod store;

pub use auth::{AuthErrorKind, AuthProvider, IdentityToolkitAuth};
pub use catalog::{CatalogApi, TmdbCatalog};
pub use catalog_search::{CatalogSearch, SearchOutcome};
pub use movies::MovieService;
pub use storage::{HttpObjectStore, ObjectStore};
pub use store::{DocumentStore, PgDocumentStore};
