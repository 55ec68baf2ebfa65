use crate::{
    error::AppResult,
    models::{CatalogEntry, CatalogPage},
};

pub mod tmdb;

pub use tmdb::TmdbCatalog;

/// Trait for external movie catalogs
///
/// Catalogs supply public metadata used to browse movies and pre-fill new
/// watchlist records. Failures are reduced to the catalog messages in
/// [`crate::error::messages`].
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search movies by title; `page` starts at 1.
    ///
    /// A blank query is rejected with `AppError::InvalidInput` without a
    /// network call.
    async fn search(&self, query: &str, page: u32) -> AppResult<CatalogPage>;

    /// Full details for one catalog movie
    async fn get_details(&self, catalog_id: u64) -> AppResult<CatalogEntry>;

    /// Catalog name for logging and debugging
    fn name(&self) -> &'static str;
}
