//! Derivation of the displayed watchlist from the fetched records and the
//! current [`ViewParameters`].

use std::cmp::Ordering;
use std::collections::BTreeSet;

use icu_collator::{Collator, CollatorOptions};

use crate::models::{MovieRecord, SortKey, StatusFilter, ViewParameters, ALL_GENRES};

/// Filters and orders `records` for display. `records` is left untouched and
/// the result only contains clones of its elements.
pub fn project(records: &[MovieRecord], params: &ViewParameters) -> Vec<MovieRecord> {
    let needle = params.search.trim().to_lowercase();
    let genre = params
        .genre
        .as_deref()
        .filter(|g| *g != ALL_GENRES);

    let mut projected: Vec<MovieRecord> = records
        .iter()
        .filter(|r| matches_status(r, params.status))
        .filter(|r| genre.map_or(true, |g| r.fields.genre.as_deref() == Some(g)))
        .filter(|r| needle.is_empty() || r.title().to_lowercase().contains(&needle))
        .cloned()
        .collect();

    // `sort_by` is stable: equal keys keep their filtered order.
    match params.sort {
        SortKey::Newest => projected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => projected.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::TopRated => projected.sort_by(|a, b| {
            b.fields
                .rating
                .unwrap_or(0)
                .cmp(&a.fields.rating.unwrap_or(0))
        }),
        SortKey::Alphabetical => projected.sort_by(|a, b| compare_titles(a.title(), b.title())),
    }

    projected
}

/// Genre filter choices: the "all" sentinel, then every distinct non-empty
/// genre present in `records`, ascending.
pub fn genre_options(records: &[MovieRecord]) -> Vec<String> {
    let genres: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.fields.genre.as_deref())
        .filter(|g| !g.is_empty())
        .collect();

    std::iter::once(ALL_GENRES)
        .chain(genres)
        .map(str::to_string)
        .collect()
}

fn matches_status(record: &MovieRecord, status: StatusFilter) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Watched => record.is_watched(),
        StatusFilter::Unwatched => !record.is_watched(),
    }
}

thread_local! {
    /// Root-locale collator (tertiary strength)
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Locale-aware title order: accents and case are secondary to the base
/// letters, lowercase sorts before uppercase, and fully equal collation keys
/// fall back to a byte comparison.
fn compare_titles(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => a
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase)),
        })
        .then_with(|| a.cmp(b))
}
