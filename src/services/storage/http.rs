//! Object store over plain HTTP
//!
//! Uploads are `PUT {base}/{path}` with the image bytes, deletes are `DELETE` on
//! the public URL. URLs outside the bucket (catalog posters, for example) are
//! never deleted.

use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    error::{messages, AppError, AppResult},
    models::LocalImage,
    services::storage::ObjectStore,
};

const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

#[derive(Clone)]
pub struct HttpObjectStore {
    http_client: HttpClient,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpObjectStore {
    pub fn new(base_url: String, auth_token: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    /// Public URL an object stored at `path` is served from
    pub fn object_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn owns(&self, url: &str) -> bool {
        url.strip_prefix(&self.base_url)
            .is_some_and(|rest| rest.starts_with('/') && rest.len() > 1)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn put_object(&self, image: &LocalImage, path: &str) -> AppResult<String> {
        let bytes = tokio::fs::read(&image.path).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to read image {}: {}",
                image.path.display(),
                e
            ))
        })?;

        let url = self.object_url(path);
        let response = self
            .authorize(self.http_client.put(&url))
            .header(reqwest::header::CONTENT_TYPE, IMAGE_CONTENT_TYPE)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage(format!(
                "Object store returned status {}: {}",
                status, body
            )));
        }

        Ok(url)
    }
}

#[async_trait::async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(&self, image: &LocalImage, path: &str) -> AppResult<String> {
        let url = self
            .put_object(image, path)
            .await
            .map_err(|e| e.collapse("storage.upload", messages::UPLOAD_IMAGE_FAILED))?;

        tracing::info!(path = %path, "Image uploaded");
        Ok(url)
    }

    async fn delete(&self, url: &str) {
        if !self.owns(url) {
            tracing::debug!(url = %url, "Skipping delete of image outside the bucket");
            return;
        }

        match self.authorize(self.http_client.delete(url)).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(url = %url, "Image deleted");
            }
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                tracing::debug!(url = %url, "Image already gone");
            }
            Ok(response) => {
                tracing::warn!(url = %url, status = %response.status(), "Image delete rejected");
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Image delete failed");
            }
        }
    }
}
