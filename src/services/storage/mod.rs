//! Poster image storage

use crate::{error::AppResult, models::LocalImage};

pub mod http;

pub use http::HttpObjectStore;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads a local image under `path` and returns its public URL
    async fn upload(&self, image: &LocalImage, path: &str) -> AppResult<String>;

    /// Best-effort removal; a missing object is not an error and nothing is returned
    async fn delete(&self, url: &str);
}
