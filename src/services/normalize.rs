//! Pure mappings from raw catalog and document-store shapes into the internal
//! movie shapes.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    CatalogEntry, Genre, MovieFields, MovieRecord, TmdbMovie, TmdbMovieDetail,
};

const DESCRIPTION_MAX: usize = 500;
const TITLE_MAX: usize = 150;

/// TMDB genre id → internal genre label
const CATALOG_GENRES: &[(u64, Genre)] = &[
    (28, Genre::Action),
    (12, Genre::Action),
    (16, Genre::Animation),
    (35, Genre::Comedy),
    (80, Genre::Drama),
    (99, Genre::Documentary),
    (18, Genre::Drama),
    (10751, Genre::Drama),
    (14, Genre::Drama),
    (36, Genre::Drama),
    (27, Genre::Horror),
    (10402, Genre::Drama),
    (9648, Genre::Thriller),
    (10749, Genre::Romance),
    (878, Genre::SciFi),
    (10770, Genre::Drama),
    (53, Genre::Thriller),
    (10752, Genre::Action),
    (37, Genre::Action),
];

/// Poster rendition sizes served by the catalog image CDN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosterSize {
    /// List thumbnails
    Small,
    /// Detail screens and saved records
    Large,
}

impl PosterSize {
    fn segment(&self) -> &'static str {
        match self {
            PosterSize::Small => "w342",
            PosterSize::Large => "w780",
        }
    }
}

/// First id in the list that has a mapping wins; `Other` when none do.
pub fn map_catalog_genre(genre_ids: &[u64]) -> Genre {
    genre_ids
        .iter()
        .find_map(|id| {
            CATALOG_GENRES
                .iter()
                .find(|(catalog_id, _)| catalog_id == id)
                .map(|(_, genre)| *genre)
        })
        .unwrap_or(Genre::Other)
}

pub fn poster_url(image_base_url: &str, poster_path: Option<&str>, size: PosterSize) -> Option<String> {
    let path = poster_path.filter(|p| !p.is_empty())?;
    Some(format!(
        "{}/{}{}",
        image_base_url.trim_end_matches('/'),
        size.segment(),
        path
    ))
}

fn release_year(release_date: Option<&str>) -> String {
    release_date
        .map(|date| date.chars().take(4).collect())
        .unwrap_or_default()
}

pub fn catalog_entry_from_search(movie: TmdbMovie, image_base_url: &str) -> CatalogEntry {
    CatalogEntry {
        catalog_id: movie.id,
        title: movie.title,
        year: release_year(movie.release_date.as_deref()),
        poster_url: poster_url(image_base_url, movie.poster_path.as_deref(), PosterSize::Small),
        poster_path: movie.poster_path,
        overview: movie.overview,
        rating: movie.vote_average.unwrap_or_default(),
        genre: map_catalog_genre(&movie.genre_ids),
        genre_ids: movie.genre_ids,
        runtime: None,
        genres: Vec::new(),
    }
}

pub fn catalog_entry_from_detail(detail: TmdbMovieDetail, image_base_url: &str) -> CatalogEntry {
    let genre_ids: Vec<u64> = detail.genres.iter().map(|g| g.id).collect();

    CatalogEntry {
        catalog_id: detail.id,
        title: detail.title,
        year: release_year(detail.release_date.as_deref()),
        poster_url: poster_url(image_base_url, detail.poster_path.as_deref(), PosterSize::Large),
        poster_path: detail.poster_path,
        overview: detail.overview,
        rating: detail.vote_average.unwrap_or_default(),
        genre: map_catalog_genre(&genre_ids),
        genre_ids,
        runtime: detail.runtime,
        genres: detail.genres.into_iter().map(|g| g.name).collect(),
    }
}

/// Spreads the store-assigned identity onto the raw stored attributes.
pub fn record_from_document(
    id: String,
    owner_id: String,
    fields: MovieFields,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
) -> MovieRecord {
    MovieRecord {
        id,
        owner_id,
        fields,
        created_at,
        updated_at,
    }
}

/// Pre-fills a new watchlist record from a catalog entry.
///
/// `large_poster_url` should be the large rendition of the entry's poster.
pub fn fields_from_catalog(
    entry: &CatalogEntry,
    rating: u8,
    watched: bool,
    watch_date: NaiveDate,
    large_poster_url: Option<String>,
) -> MovieFields {
    MovieFields {
        title: Some(entry.title.chars().take(TITLE_MAX).collect()),
        genre: Some(entry.genre.label().to_string()),
        description: Some(
            entry
                .overview
                .as_deref()
                .unwrap_or_default()
                .chars()
                .take(DESCRIPTION_MAX)
                .collect(),
        ),
        rating: Some(rating),
        watched: Some(watched),
        watch_date: Some(watch_date.format("%Y-%m-%d").to_string()),
        image_url: large_poster_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TmdbGenre;

    const IMAGES: &str = "https://image.tmdb.org/t/p";

    fn search_result() -> TmdbMovie {
        TmdbMovie {
            id: 27205,
            title: "Inception".to_string(),
            release_date: Some("2010-07-15".to_string()),
            poster_path: Some("/inception.jpg".to_string()),
            overview: Some("Dreams within dreams".to_string()),
            vote_average: Some(8.4),
            genre_ids: vec![878, 28, 12],
        }
    }

    fn detail() -> TmdbMovieDetail {
        TmdbMovieDetail {
            id: 27205,
            title: "Inception".to_string(),
            release_date: Some("2010-07-15".to_string()),
            poster_path: Some("/inception.jpg".to_string()),
            overview: Some("Dreams within dreams".to_string()),
            vote_average: Some(8.4),
            runtime: Some(148),
            genres: vec![
                TmdbGenre {
                    id: 878,
                    name: "Science Fiction".to_string(),
                },
                TmdbGenre {
                    id: 28,
                    name: "Action".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_map_catalog_genre_first_match_wins() {
        assert_eq!(map_catalog_genre(&[878, 28]), Genre::SciFi);
        assert_eq!(map_catalog_genre(&[28, 878]), Genre::Action);
    }

    #[test]
    fn test_map_catalog_genre_skips_unmapped_ids() {
        assert_eq!(map_catalog_genre(&[1, 2, 27]), Genre::Horror);
    }

    #[test]
    fn test_map_catalog_genre_defaults_to_other() {
        assert_eq!(map_catalog_genre(&[]), Genre::Other);
        assert_eq!(map_catalog_genre(&[4242]), Genre::Other);
    }

    #[test]
    fn test_catalog_entry_from_search() {
        let entry = catalog_entry_from_search(search_result(), IMAGES);

        assert_eq!(entry.catalog_id, 27205);
        assert_eq!(entry.year, "2010");
        assert_eq!(
            entry.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w342/inception.jpg")
        );
        assert_eq!(entry.rating, 8.4);
        assert_eq!(entry.genre, Genre::SciFi);
        assert_eq!(entry.runtime, None);
        assert!(entry.genres.is_empty());
    }

    #[test]
    fn test_catalog_entry_missing_release_date_and_poster() {
        let mut movie = search_result();
        movie.release_date = None;
        movie.poster_path = None;
        movie.vote_average = None;

        let entry = catalog_entry_from_search(movie, IMAGES);
        assert_eq!(entry.year, "");
        assert_eq!(entry.poster_url, None);
        assert_eq!(entry.rating, 0.0);
    }

    #[test]
    fn test_catalog_entry_short_release_date() {
        let mut movie = search_result();
        movie.release_date = Some("19".to_string());
        assert_eq!(catalog_entry_from_search(movie, IMAGES).year, "19");
    }

    #[test]
    fn test_catalog_entry_from_detail() {
        let entry = catalog_entry_from_detail(detail(), IMAGES);

        assert_eq!(entry.runtime, Some(148));
        assert_eq!(entry.genres, vec!["Science Fiction", "Action"]);
        assert_eq!(entry.genre_ids, vec![878, 28]);
        assert_eq!(
            entry.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w780/inception.jpg")
        );
    }

    #[test]
    fn test_search_and_detail_agree_on_genre() {
        let from_search = catalog_entry_from_search(search_result(), IMAGES);
        let from_detail = catalog_entry_from_detail(detail(), IMAGES);
        assert_eq!(from_search.genre, from_detail.genre);
    }

    #[test]
    fn test_record_from_document_keeps_values() {
        let fields = MovieFields {
            title: Some("Cube".to_string()),
            rating: Some(3),
            ..Default::default()
        };
        let record = record_from_document(
            "doc-1".to_string(),
            "owner-1".to_string(),
            fields.clone(),
            None,
            None,
        );

        assert_eq!(record.id, "doc-1");
        assert_eq!(record.owner_id, "owner-1");
        assert_eq!(record.fields, fields);
    }

    #[test]
    fn test_fields_from_catalog_truncates_overview() {
        let mut entry = catalog_entry_from_detail(detail(), IMAGES);
        entry.overview = Some("o".repeat(600));
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();

        let fields = fields_from_catalog(&entry, 4, false, date, entry.poster_url.clone());

        assert_eq!(fields.description.as_ref().map(|d| d.len()), Some(500));
        assert_eq!(fields.genre.as_deref(), Some("Sci-Fi"));
        assert_eq!(fields.watched, Some(false));
        assert_eq!(fields.watch_date.as_deref(), Some("2025-01-02"));
        assert_eq!(
            fields.image_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w780/inception.jpg")
        );
    }
}
