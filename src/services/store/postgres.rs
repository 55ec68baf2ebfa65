//! Postgres-backed document store
//!
//! Each movie is one row in `movies`: the owner and timestamps are columns, the
//! user-editable attributes are a JSONB document so that partial documents and
//! partial patches behave like a document database.

use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::{
    error::{messages, AppError, AppResult},
    models::{MovieFields, MovieRecord, MovieStats},
    services::{normalize::record_from_document, store::DocumentStore},
};

#[derive(Debug, sqlx::FromRow)]
struct MovieRow {
    id: String,
    owner_id: String,
    doc: Json<MovieFields>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<MovieRow> for MovieRecord {
    fn from(row: MovieRow) -> Self {
        record_from_document(
            row.id,
            row.owner_id,
            row.doc.0,
            row.created_at,
            row.updated_at,
        )
    }
}

#[derive(Clone)]
pub struct PgDocumentStore {
    db_pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    async fn fetch_owned(&self, owner_id: &str) -> AppResult<Vec<MovieRecord>> {
        let rows = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, owner_id, doc, created_at, updated_at
            FROM movies
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(rows.into_iter().map(MovieRecord::from).collect())
    }

    async fn fetch_one(&self, id: &str) -> AppResult<Option<MovieRecord>> {
        let row = sqlx::query_as::<_, MovieRow>(
            r#"
            SELECT id, owner_id, doc, created_at, updated_at
            FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(row.map(MovieRecord::from))
    }

    async fn insert(&self, owner_id: &str, fields: &MovieFields) -> AppResult<String> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO movies (id, owner_id, doc, created_at, updated_at)
            VALUES ($1, $2, $3, now(), now())
            "#,
        )
        .bind(&id)
        .bind(owner_id)
        .bind(Json(fields))
        .execute(&self.db_pool)
        .await?;

        Ok(id)
    }

    async fn patch(&self, id: &str, patch: &MovieFields) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET doc = doc || $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(Json(patch))
        .execute(&self.db_pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("movie {}", id)));
        }
        Ok(())
    }

    async fn remove(&self, id: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }

    async fn counts(&self, owner_id: &str) -> AppResult<MovieStats> {
        let (total, watched): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE doc -> 'watched' = 'true'::jsonb) AS watched
            FROM movies
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(MovieStats {
            total: total.max(0) as u64,
            watched_count: watched.max(0) as u64,
        })
    }
}

#[async_trait::async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list(&self, owner_id: &str) -> AppResult<Vec<MovieRecord>> {
        let records = self
            .fetch_owned(owner_id)
            .await
            .map_err(|e| e.collapse("movies.list", messages::LOAD_MOVIES_FAILED))?;

        tracing::info!(
            owner_id = %owner_id,
            records = records.len(),
            "Movies loaded"
        );

        Ok(records)
    }

    async fn get(&self, id: &str) -> AppResult<MovieRecord> {
        match self.fetch_one(id).await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(AppError::NotFound(messages::MOVIE_NOT_FOUND.to_string())),
            Err(e) => Err(e.collapse("movies.get", messages::LOAD_MOVIE_FAILED)),
        }
    }

    async fn create(&self, owner_id: &str, fields: &MovieFields) -> AppResult<String> {
        let id = self
            .insert(owner_id, fields)
            .await
            .map_err(|e| e.collapse("movies.create", messages::ADD_MOVIE_FAILED))?;

        tracing::info!(movie_id = %id, owner_id = %owner_id, "Movie created");
        Ok(id)
    }

    async fn update(&self, id: &str, patch: &MovieFields) -> AppResult<()> {
        self.patch(id, patch)
            .await
            .map_err(|e| e.collapse("movies.update", messages::UPDATE_MOVIE_FAILED))?;

        tracing::info!(movie_id = %id, "Movie updated");
        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.remove(id)
            .await
            .map_err(|e| e.collapse("movies.delete", messages::DELETE_MOVIE_FAILED))?;

        tracing::info!(movie_id = %id, "Movie deleted");
        Ok(())
    }

    async fn count_by_owner(&self, owner_id: &str) -> MovieStats {
        match self.counts(owner_id).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(error = %e, owner_id = %owner_id, "Failed to count movies");
                MovieStats::default()
            }
        }
    }
}
