//! Watchlist record CRUD, including poster image handling.
//!
//! Image writes are ordered relative to the document write:
//! - add: upload first; an upload failure is logged and the record is saved
//!   without a poster.
//! - update: upload the new image, delete the old one, then write the patch; an
//!   upload failure aborts before the document is touched.
//! - delete: remove the document, then the image.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, LocalImage, MovieForm, MovieRecord, MovieStats},
    services::{
        normalize::fields_from_catalog, storage::ObjectStore, store::DocumentStore,
    },
    validation::validate_movie,
};

#[derive(Clone)]
pub struct MovieService {
    store: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
}

impl MovieService {
    pub fn new(store: Arc<dyn DocumentStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { store, objects }
    }

    pub async fn get_movie(&self, movie_id: &str) -> AppResult<MovieRecord> {
        self.store.get(movie_id).await
    }

    /// Creates a record from the add form, optionally with a picked poster.
    pub async fn add_movie(
        &self,
        owner_id: &str,
        form: &MovieForm,
        image: Option<&LocalImage>,
    ) -> AppResult<String> {
        check_form(form)?;

        let mut image_url = None;
        if let Some(image) = image {
            let path = poster_path(owner_id);
            match self.objects.upload(image, &path).await {
                Ok(url) => image_url = Some(url),
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        owner_id = %owner_id,
                        "Image upload failed, saving movie without poster"
                    );
                }
            }
        }

        self.store.create(owner_id, &form.to_fields(image_url)).await
    }

    /// Adds a catalog movie to the owner's watchlist with the catalog poster.
    pub async fn add_from_catalog(
        &self,
        owner_id: &str,
        entry: &CatalogEntry,
        rating: u8,
        watched: bool,
        watch_date: NaiveDate,
        poster_url: Option<String>,
    ) -> AppResult<String> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::InvalidInput(
                "Rating must be between 1 and 5".to_string(),
            ));
        }

        let fields = fields_from_catalog(entry, rating, watched, watch_date, poster_url);
        let id = self.store.create(owner_id, &fields).await?;

        tracing::info!(
            movie_id = %id,
            catalog_id = entry.catalog_id,
            "Catalog movie added to watchlist"
        );
        Ok(id)
    }

    /// Applies the edit form. A new image replaces `existing_image_url`.
    pub async fn update_movie(
        &self,
        movie_id: &str,
        form: &MovieForm,
        new_image: Option<&LocalImage>,
        existing_image_url: Option<&str>,
    ) -> AppResult<()> {
        check_form(form)?;

        let mut image_url = existing_image_url.map(str::to_string);

        if let Some(image) = new_image {
            let url = self.objects.upload(image, &poster_path(movie_id)).await?;

            if let Some(old) = existing_image_url {
                self.objects.delete(old).await;
            }
            image_url = Some(url);
        }

        self.store
            .update(movie_id, &form.to_fields(image_url))
            .await
    }

    pub async fn delete_movie(&self, movie_id: &str, image_url: Option<&str>) -> AppResult<()> {
        self.store.delete(movie_id).await?;

        if let Some(url) = image_url {
            self.objects.delete(url).await;
        }
        Ok(())
    }

    pub async fn stats(&self, owner_id: &str) -> MovieStats {
        self.store.count_by_owner(owner_id).await
    }
}

fn check_form(form: &MovieForm) -> AppResult<()> {
    let errors = validate_movie(form);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// `posters/{prefix}_{unix_millis}.jpg`
fn poster_path(prefix: &str) -> String {
    format!("posters/{}_{}.jpg", prefix, Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::messages;
    use crate::models::Genre;
    use crate::services::storage::MockObjectStore;
    use crate::services::store::MockDocumentStore;
    use mockall::predicate::{always, eq};
    use mockall::Sequence;
    use tokio_test::{assert_err, assert_ok};

    fn form() -> MovieForm {
        MovieForm {
            title: "Arrival".to_string(),
            genre: "Sci-Fi".to_string(),
            description: "Linguist meets heptapods".to_string(),
            rating: 4,
            watched: false,
            watch_date: "2024-05-01".to_string(),
        }
    }

    fn service(store: MockDocumentStore, objects: MockObjectStore) -> MovieService {
        MovieService::new(Arc::new(store), Arc::new(objects))
    }

    #[test]
    fn test_poster_path_shape() {
        let path = poster_path("owner-1");
        assert!(path.starts_with("posters/owner-1_"));
        assert!(path.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn test_add_movie_with_uploaded_poster() {
        let mut objects = MockObjectStore::new();
        objects
            .expect_upload()
            .times(1)
            .returning(|_, _| Ok("https://bucket/posters/p.jpg".to_string()));

        let mut store = MockDocumentStore::new();
        store
            .expect_create()
            .withf(|owner, fields| {
                owner == "u1" && fields.image_url.as_deref() == Some("https://bucket/posters/p.jpg")
            })
            .times(1)
            .returning(|_, _| Ok("m1".to_string()));

        let id = service(store, objects)
            .add_movie("u1", &form(), Some(&LocalImage::new("/tmp/p.jpg")))
            .await;
        assert_eq!(assert_ok!(id), "m1");
    }

    #[tokio::test]
    async fn test_add_movie_upload_failure_still_creates_record() {
        let mut objects = MockObjectStore::new();
        objects
            .expect_upload()
            .times(1)
            .returning(|_, _| Err(AppError::Failed(messages::UPLOAD_IMAGE_FAILED.to_string())));

        let mut store = MockDocumentStore::new();
        store
            .expect_create()
            .withf(|_, fields| fields.image_url.is_none())
            .times(1)
            .returning(|_, _| Ok("m1".to_string()));

        let id = service(store, objects)
            .add_movie("u1", &form(), Some(&LocalImage::new("/tmp/p.jpg")))
            .await;
        assert_eq!(assert_ok!(id), "m1");
    }

    #[tokio::test]
    async fn test_add_movie_rejects_invalid_form_before_any_call() {
        let mut bad = form();
        bad.rating = 0;

        let result = service(MockDocumentStore::new(), MockObjectStore::new())
            .add_movie("u1", &bad, None)
            .await;

        match assert_err!(result) {
            AppError::Validation(errors) => assert_eq!(errors[0].field, "rating"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_movie_replaces_image_in_order() {
        let mut seq = Sequence::new();
        let mut objects = MockObjectStore::new();
        let mut store = MockDocumentStore::new();

        objects
            .expect_upload()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, path| {
                assert!(path.starts_with("posters/m1_"));
                Ok("https://bucket/posters/new.jpg".to_string())
            });
        objects
            .expect_delete()
            .with(eq("https://bucket/posters/old.jpg"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ());
        store
            .expect_update()
            .withf(|id, patch| {
                id == "m1" && patch.image_url.as_deref() == Some("https://bucket/posters/new.jpg")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let result = service(store, objects)
            .update_movie(
                "m1",
                &form(),
                Some(&LocalImage::new("/tmp/new.jpg")),
                Some("https://bucket/posters/old.jpg"),
            )
            .await;
        assert_ok!(result);
    }

    #[tokio::test]
    async fn test_update_movie_upload_failure_leaves_document_untouched() {
        let mut objects = MockObjectStore::new();
        objects
            .expect_upload()
            .times(1)
            .returning(|_, _| Err(AppError::Failed(messages::UPLOAD_IMAGE_FAILED.to_string())));
        objects.expect_delete().never();

        let mut store = MockDocumentStore::new();
        store.expect_update().never();

        let result = service(store, objects)
            .update_movie(
                "m1",
                &form(),
                Some(&LocalImage::new("/tmp/new.jpg")),
                Some("https://bucket/posters/old.jpg"),
            )
            .await;

        assert_eq!(assert_err!(result).user_message(), messages::UPLOAD_IMAGE_FAILED);
    }

    #[tokio::test]
    async fn test_update_movie_keeps_existing_image() {
        let mut objects = MockObjectStore::new();
        objects.expect_upload().never();
        objects.expect_delete().never();

        let mut store = MockDocumentStore::new();
        store
            .expect_update()
            .withf(|_, patch| patch.image_url.as_deref() == Some("https://bucket/posters/old.jpg"))
            .times(1)
            .returning(|_, _| Ok(()));

        let result = service(store, objects)
            .update_movie("m1", &form(), None, Some("https://bucket/posters/old.jpg"))
            .await;
        assert_ok!(result);
    }

    #[tokio::test]
    async fn test_delete_movie_removes_image_after_document() {
        let mut seq = Sequence::new();
        let mut store = MockDocumentStore::new();
        let mut objects = MockObjectStore::new();

        store
            .expect_delete()
            .with(eq("m1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        objects
            .expect_delete()
            .with(always())
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ());

        let result = service(store, objects)
            .delete_movie("m1", Some("https://bucket/posters/p.jpg"))
            .await;
        assert_ok!(result);
    }

    #[tokio::test]
    async fn test_delete_movie_failure_keeps_image() {
        let mut store = MockDocumentStore::new();
        store
            .expect_delete()
            .returning(|_| Err(AppError::Failed(messages::DELETE_MOVIE_FAILED.to_string())));
        let mut objects = MockObjectStore::new();
        objects.expect_delete().never();

        let result = service(store, objects)
            .delete_movie("m1", Some("https://bucket/posters/p.jpg"))
            .await;
        assert_eq!(assert_err!(result).user_message(), messages::DELETE_MOVIE_FAILED);
    }

    #[tokio::test]
    async fn test_add_from_catalog_prefills_fields() {
        let entry = CatalogEntry {
            catalog_id: 603,
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
            poster_path: Some("/matrix.jpg".to_string()),
            poster_url: Some("https://image.tmdb.org/t/p/w342/matrix.jpg".to_string()),
            overview: Some("Red pill".to_string()),
            rating: 8.2,
            genre_ids: vec![28, 878],
            genre: Genre::Action,
            runtime: Some(136),
            genres: vec!["Action".to_string(), "Science Fiction".to_string()],
        };

        let mut store = MockDocumentStore::new();
        store
            .expect_create()
            .withf(|owner, fields| {
                owner == "u1"
                    && fields.genre.as_deref() == Some("Action")
                    && fields.description.as_deref() == Some("Red pill")
                    && fields.image_url.as_deref()
                        == Some("https://image.tmdb.org/t/p/w780/matrix.jpg")
            })
            .times(1)
            .returning(|_, _| Ok("m9".to_string()));

        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let id = service(store, MockObjectStore::new())
            .add_from_catalog(
                "u1",
                &entry,
                5,
                true,
                date,
                Some("https://image.tmdb.org/t/p/w780/matrix.jpg".to_string()),
            )
            .await;
        assert_eq!(assert_ok!(id), "m9");
    }

    #[tokio::test]
    async fn test_add_from_catalog_rejects_rating_out_of_range() {
        let entry = CatalogEntry {
            catalog_id: 1,
            title: "X".to_string(),
            year: String::new(),
            poster_path: None,
            poster_url: None,
            overview: None,
            rating: 0.0,
            genre_ids: vec![],
            genre: Genre::Other,
            runtime: None,
            genres: vec![],
        };
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let result = service(MockDocumentStore::new(), MockObjectStore::new())
            .add_from_catalog("u1", &entry, 6, false, date, None)
            .await;
        assert!(matches!(assert_err!(result), AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_stats_delegates_to_store() {
        let mut store = MockDocumentStore::new();
        store.expect_count_by_owner().with(eq("u1")).returning(|_| MovieStats {
            total: 3,
            watched_count: 1,
        });

        let stats = service(store, MockObjectStore::new()).stats("u1").await;
        assert_eq!(stats.total, 3);
        assert_eq!(stats.watched_count, 1);
    }
}
