use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use std::{fmt::Display, path::PathBuf, str::FromStr};

/// Internal genre labels a record can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Horror,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Romance,
    Thriller,
    Animation,
    Documentary,
    Other,
}

impl Genre {
    pub const ALL: [Genre; 10] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Horror,
        Genre::SciFi,
        Genre::Romance,
        Genre::Thriller,
        Genre::Animation,
        Genre::Documentary,
        Genre::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Horror => "Horror",
            Genre::SciFi => "Sci-Fi",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Animation => "Animation",
            Genre::Documentary => "Documentary",
            Genre::Other => "Other",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .iter()
            .find(|g| g.label() == s)
            .copied()
            .ok_or_else(|| format!("Unknown genre: {}", s))
    }
}

/// Stored attributes of a movie document.
///
/// Documents written by older clients may lack any attribute, so every field is
/// optional and absent keys are omitted when patching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieFields {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<u8>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub watched: Option<bool>,
    /// Stored as entered (`YYYY-MM-DD` by shape, not necessarily a real date)
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub watch_date: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A stored attribute of the wrong type reads as absent instead of failing the
/// whole document.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Accepts any JSON number (`4`, `4.0`, `4.4`), rounded and clamped to 1..=5.
fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .filter(|n| n.is_finite())
        .map(|n| n.round().clamp(1.0, 5.0) as u8))
}

/// A movie in an owner's watchlist, as held by the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    pub id: String,
    pub owner_id: String,
    #[serde(flatten)]
    pub fields: MovieFields,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MovieRecord {
    pub fn title(&self) -> &str {
        self.fields.title.as_deref().unwrap_or_default()
    }

    pub fn is_watched(&self) -> bool {
        self.fields.watched == Some(true)
    }
}

/// Values entered on the add/edit movie form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieForm {
    pub title: String,
    pub genre: String,
    pub description: String,
    pub rating: u8,
    pub watched: bool,
    /// `YYYY-MM-DD`
    pub watch_date: String,
}

impl MovieForm {
    /// Converts a validated form into the stored attributes.
    pub fn to_fields(&self, image_url: Option<String>) -> MovieFields {
        MovieFields {
            title: Some(self.title.trim().to_string()),
            genre: Some(self.genre.clone()),
            description: Some(self.description.clone()),
            rating: Some(self.rating),
            watched: Some(self.watched),
            watch_date: Some(self.watch_date.clone()),
            image_url,
        }
    }

    /// Pre-fills the edit form from a stored record
    pub fn from_record(record: &MovieRecord) -> Self {
        Self {
            title: record.title().to_string(),
            genre: record.fields.genre.clone().unwrap_or_default(),
            description: record.fields.description.clone().unwrap_or_default(),
            rating: record.fields.rating.unwrap_or(3),
            watched: record.is_watched(),
            watch_date: record.fields.watch_date.clone().unwrap_or_default(),
        }
    }
}

/// Watchlist counts shown on the profile screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieStats {
    pub total: u64,
    pub watched_count: u64,
}

/// A poster image picked on the device, not yet uploaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalImage {
    pub path: PathBuf,
}

impl LocalImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}
