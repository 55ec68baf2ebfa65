//! TMDB catalog provider
//!
//! API Flow:
//! 1. Search: /search/movie?query=..&page=.. → page of movie summaries
//! 2. Details: /movie/{id} → runtime and named genres
//!
//! Responses are normalized into [`CatalogEntry`] and, when Redis is configured,
//! cached so repeated keystrokes and detail views do not spend API quota.

use reqwest::Client as HttpClient;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{messages, AppError, AppResult},
    models::{CatalogEntry, CatalogPage, TmdbMovieDetail, TmdbSearchResponse},
    services::{
        catalog::CatalogApi,
        normalize::{catalog_entry_from_detail, catalog_entry_from_search},
    },
};

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const DETAILS_CACHE_TTL: u64 = 86400; // 1 day
const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_token: String,
    api_url: String,
    image_url: String,
    cache: Option<Cache>,
}

impl TmdbCatalog {
    pub fn new(
        cache: Option<Cache>,
        api_token: String,
        api_url: String,
        image_url: String,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url,
            cache,
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.api_token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::debug!(response = %response_text, "Raw TMDB API response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }

    async fn fetch_search(&self, query: &str, page: u32) -> AppResult<CatalogPage> {
        let url = format!("{}/search/movie", self.api_url);
        let page_param = page.to_string();

        let response: TmdbSearchResponse = self
            .get_json(
                &url,
                &[
                    ("query", query),
                    ("page", page_param.as_str()),
                    ("language", LANGUAGE),
                ],
            )
            .await?;

        let results: Vec<CatalogEntry> = response
            .results
            .into_iter()
            .map(|movie| catalog_entry_from_search(movie, &self.image_url))
            .collect();

        tracing::info!(
            query = %query,
            page = response.page,
            results = results.len(),
            provider = self.name(),
            "Catalog search completed"
        );

        Ok(CatalogPage {
            results,
            page: response.page,
            total_pages: response.total_pages,
        })
    }

    async fn fetch_details(&self, catalog_id: u64) -> AppResult<CatalogEntry> {
        let url = format!("{}/movie/{}", self.api_url, catalog_id);
        let detail: TmdbMovieDetail = self.get_json(&url, &[("language", LANGUAGE)]).await?;

        tracing::info!(catalog_id, provider = self.name(), "Catalog details fetched");

        Ok(catalog_entry_from_detail(detail, &self.image_url))
    }

    async fn search_page(&self, query: &str, page: u32) -> AppResult<CatalogPage> {
        cached!(
            self.cache.as_ref(),
            CacheKey::CatalogSearch {
                query: query.to_string(),
                page,
            },
            SEARCH_CACHE_TTL,
            self.fetch_search(query, page)
        )
    }

    async fn details(&self, catalog_id: u64) -> AppResult<CatalogEntry> {
        cached!(
            self.cache.as_ref(),
            CacheKey::CatalogDetails(catalog_id),
            DETAILS_CACHE_TTL,
            self.fetch_details(catalog_id)
        )
    }
}

#[async_trait::async_trait]
impl CatalogApi for TmdbCatalog {
    async fn search(&self, query: &str, page: u32) -> AppResult<CatalogPage> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        self.search_page(query, page.max(1))
            .await
            .map_err(|e| e.collapse("catalog.search", messages::SEARCH_FAILED))
    }

    async fn get_details(&self, catalog_id: u64) -> AppResult<CatalogEntry> {
        self.details(catalog_id)
            .await
            .map_err(|e| e.collapse("catalog.details", messages::CATALOG_DETAILS_FAILED))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
