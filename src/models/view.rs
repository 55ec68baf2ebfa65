use serde::{Deserialize, Serialize};

/// Genre filter value that disables genre filtering
pub const ALL_GENRES: &str = "all";

/// Watched-status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Watched,
    Unwatched,
}

/// Projection ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    TopRated,
    Alphabetical,
}

/// User-chosen criteria the watchlist projection is derived from.
///
/// Owned by a single view model and reset whenever a new one is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParameters {
    pub search: String,
    pub status: StatusFilter,
    /// `None` or [`ALL_GENRES`] keeps every genre
    pub genre: Option<String>,
    pub sort: SortKey,
}

impl ViewParameters {
    pub fn merge(&mut self, patch: ViewParametersPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(sort) = patch.sort {
            self.sort = sort;
        }
    }
}

/// Partial update of [`ViewParameters`]; `None` fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParametersPatch {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub genre: Option<Option<String>>,
    pub sort: Option<SortKey>,
}

impl ViewParametersPatch {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(Some(genre.into()));
        self
    }

    pub fn clear_genre(mut self) -> Self {
        self.genre = Some(None);
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ViewParameters::default();
        assert_eq!(params.search, "");
        assert_eq!(params.status, StatusFilter::All);
        assert_eq!(params.genre, None);
        assert_eq!(params.sort, SortKey::Newest);
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        let mut params = ViewParameters {
            search: "alien".to_string(),
            status: StatusFilter::Watched,
            genre: Some("Horror".to_string()),
            sort: SortKey::Oldest,
        };

        params.merge(ViewParametersPatch::default().sort(SortKey::TopRated));

        assert_eq!(params.search, "alien");
        assert_eq!(params.status, StatusFilter::Watched);
        assert_eq!(params.genre.as_deref(), Some("Horror"));
        assert_eq!(params.sort, SortKey::TopRated);
    }

    #[test]
    fn test_merge_can_clear_genre() {
        let mut params = ViewParameters {
            genre: Some("Horror".to_string()),
            ..Default::default()
        };
        params.merge(ViewParametersPatch::default().clear_genre());
        assert_eq!(params.genre, None);
    }

    #[test]
    fn test_sort_key_serialization() {
        assert_eq!(
            serde_json::to_string(&SortKey::TopRated).unwrap(),
            r#""top-rated""#
        );
        assert_eq!(
            serde_json::to_string(&StatusFilter::Unwatched).unwrap(),
            r#""unwatched""#
        );
    }
}
