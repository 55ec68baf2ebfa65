use crate::services::auth::AuthErrorKind;
use crate::validation::FieldError;

/// User-facing messages that remote failures collapse into
pub mod messages {
    pub const LOAD_MOVIES_FAILED: &str = "Failed to load movies. Please try again.";
    pub const MOVIE_NOT_FOUND: &str = "Movie not found.";
    pub const LOAD_MOVIE_FAILED: &str = "Failed to load movie details.";
    pub const ADD_MOVIE_FAILED: &str = "Failed to add movie. Please try again.";
    pub const UPDATE_MOVIE_FAILED: &str = "Failed to update movie. Please try again.";
    pub const DELETE_MOVIE_FAILED: &str = "Failed to delete movie. Please try again.";
    pub const SEARCH_FAILED: &str = "Failed to search movies. Check your connection.";
    pub const CATALOG_DETAILS_FAILED: &str = "Failed to load movie details.";
    pub const UPLOAD_IMAGE_FAILED: &str = "Failed to upload image. Please try again.";
    pub const UNEXPECTED: &str = "An unexpected error occurred. Please try again.";
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthErrorKind),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// A remote failure already reduced to the message shown to the user
    #[error("{0}")]
    Failed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Logs the underlying cause and replaces it with a per-operation message.
    pub fn collapse(self, operation: &'static str, message: &str) -> AppError {
        tracing::error!(error = %self, operation, "Remote operation failed");
        AppError::Failed(message.to_string())
    }

    /// The string a screen may show for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Failed(msg) | AppError::NotFound(msg) | AppError::InvalidInput(msg) => {
                msg.clone()
            }
            AppError::Auth(kind) => kind.to_string(),
            AppError::Validation(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| messages::UNEXPECTED.to_string()),
            _ => messages::UNEXPECTED.to_string(),
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type AppResult<T> = Result<T, AppError>;
