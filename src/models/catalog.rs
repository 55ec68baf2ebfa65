use serde::{Deserialize, Serialize};

use super::Genre;

/// A movie from the external catalog, shaped for display and for pre-filling
/// a new watchlist record. Never persisted as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub catalog_id: u64,
    pub title: String,
    /// First four characters of the release date, empty when unknown
    pub year: String,
    pub poster_path: Option<String>,
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    /// Catalog popularity score (0-10), distinct from the user's own rating
    pub rating: f64,
    pub genre_ids: Vec<u64>,
    pub genre: Genre,
    /// Only present on detail responses
    pub runtime: Option<u32>,
    /// Only populated on detail responses
    pub genres: Vec<String>,
}

/// One page of catalog search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    pub results: Vec<CatalogEntry>,
    pub page: u32,
    pub total_pages: u32,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Raw search response from GET /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

/// Movie summary as it appears in search results
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

/// Raw detail response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetail {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_search_response_deserialization() {
        let json = r#"{
            "page": 1,
            "total_pages": 3,
            "results": [{
                "id": 27205,
                "title": "Inception",
                "release_date": "2010-07-15",
                "poster_path": "/inception.jpg",
                "overview": "A thief who steals corporate secrets",
                "vote_average": 8.4,
                "genre_ids": [28, 878, 12]
            }]
        }"#;

        let response: TmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].genre_ids, vec![28, 878, 12]);
    }

    #[test]
    fn test_tmdb_movie_tolerates_nulls() {
        let json = r#"{
            "id": 1,
            "title": "Untitled",
            "release_date": null,
            "poster_path": null,
            "overview": null
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.release_date, None);
        assert!(movie.genre_ids.is_empty());
        assert_eq!(movie.vote_average, None);
    }

    #[test]
    fn test_tmdb_detail_deserialization() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-30",
            "runtime": 136,
            "vote_average": 8.2,
            "genres": [{ "id": 28, "name": "Action" }, { "id": 878, "name": "Science Fiction" }]
        }"#;

        let detail: TmdbMovieDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.runtime, Some(136));
        assert_eq!(detail.genres[1].name, "Science Fiction");
    }
}
