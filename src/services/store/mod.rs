//! Document store abstraction
//!
//! Movie records live one document per movie, scoped to the owner that created
//! them. Implementations reduce their own failures to the per-operation messages
//! in [`crate::error::messages`]; no transport error crosses this boundary.

use crate::{
    error::AppResult,
    models::{MovieFields, MovieRecord, MovieStats},
};

pub mod postgres;

pub use postgres::PgDocumentStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// All records owned by `owner_id`, in no particular order
    async fn list(&self, owner_id: &str) -> AppResult<Vec<MovieRecord>>;

    /// A single record; `AppError::NotFound` when absent
    async fn get(&self, id: &str) -> AppResult<MovieRecord>;

    /// Stores a new document and returns its assigned id.
    ///
    /// `created_at` and `updated_at` are assigned by the store.
    async fn create(&self, owner_id: &str, fields: &MovieFields) -> AppResult<String>;

    /// Overwrites the attributes present in `patch` and refreshes `updated_at`
    async fn update(&self, id: &str, patch: &MovieFields) -> AppResult<()>;

    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Never fails; zero counts are returned when the store cannot be read
    async fn count_by_owner(&self, owner_id: &str) -> MovieStats;
}
