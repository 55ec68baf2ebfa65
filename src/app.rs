//! Composition root: builds every collaborator from [`Config`] and threads the
//! explicit [`AuthState`] through to the screens' entry points.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    db::{create_pool, create_redis_client, run_migrations, Cache, CacheWriterHandle},
    error::{messages, AppError, AppResult},
    models::{AuthState, Session},
    services::{
        auth::{AuthProvider, IdentityToolkitAuth},
        catalog::{CatalogApi, TmdbCatalog},
        catalog_search::CatalogSearch,
        movies::MovieService,
        storage::{HttpObjectStore, ObjectStore},
        store::{DocumentStore, PgDocumentStore},
    },
    validation::{validate_login, validate_register, FieldError, LoginForm, RegisterForm},
    watchlist::WatchlistViewModel,
};

/// The remote collaborators an [`AppContext`] is assembled from
pub struct AppParts {
    pub auth: Arc<dyn AuthProvider>,
    pub store: Arc<dyn DocumentStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub catalog: Arc<dyn CatalogApi>,
    pub search_debounce: Duration,
}

pub struct AppContext {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
    catalog: Arc<dyn CatalogApi>,
    search_debounce: Duration,
    auth_state: Arc<RwLock<AuthState>>,
    cache_writer: Mutex<Option<CacheWriterHandle>>,
}

impl AppContext {
    /// Connects to Postgres (running migrations) and, when configured, Redis.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let pool = create_pool(&config.database_url, config.db_max_connections).await?;
        tracing::info!("Database connection pool created");
        run_migrations(&pool).await?;

        let (cache, cache_writer) = match config.redis_url.as_deref() {
            Some(url) => {
                let (cache, handle) = Cache::new(create_redis_client(url)?);
                tracing::info!("Catalog cache enabled");
                (Some(cache), Some(handle))
            }
            None => {
                tracing::info!("REDIS_URL not set, catalog responses will not be cached");
                (None, None)
            }
        };

        let parts = AppParts {
            auth: Arc::new(IdentityToolkitAuth::new(
                config.auth_api_key.clone(),
                config.auth_api_url.clone(),
            )),
            store: Arc::new(PgDocumentStore::new(pool)),
            objects: Arc::new(HttpObjectStore::new(
                config.object_store_url.clone(),
                config.object_store_token.clone(),
            )),
            catalog: Arc::new(TmdbCatalog::new(
                cache,
                config.catalog_api_token.clone(),
                config.catalog_api_url.clone(),
                config.catalog_image_url.clone(),
            )),
            search_debounce: Duration::from_millis(config.search_debounce_ms),
        };

        let context = Self::new(parts);
        *context.cache_writer.lock().await = cache_writer;
        Ok(context)
    }

    /// Assembles a context around already-built collaborators. The auth state
    /// starts as [`AuthState::Loading`] until [`AppContext::restore_session`]
    /// or a sign-in resolves it.
    pub fn new(parts: AppParts) -> Self {
        Self {
            auth: parts.auth,
            store: parts.store,
            objects: parts.objects,
            catalog: parts.catalog,
            search_debounce: parts.search_debounce,
            auth_state: Arc::new(RwLock::new(AuthState::Loading)),
            cache_writer: Mutex::new(None),
        }
    }

    pub async fn auth_state(&self) -> AuthState {
        self.auth_state.read().await.clone()
    }

    pub async fn owner_id(&self) -> Option<String> {
        self.auth_state.read().await.owner_id().map(str::to_string)
    }

    /// Resolves the initial [`AuthState::Loading`] from a persisted session, if
    /// the shell kept one.
    pub async fn restore_session(&self, session: Option<Session>) {
        let state = match session {
            Some(session) => AuthState::Authenticated(session),
            None => AuthState::Unauthenticated,
        };
        *self.auth_state.write().await = state;
    }

    pub async fn login(&self, form: &LoginForm) -> AppResult<Session> {
        reject_invalid(validate_login(form))?;

        let result = self.auth.login(form.email.trim(), &form.password).await;
        self.settle_auth(result).await
    }

    pub async fn register(&self, form: &RegisterForm) -> AppResult<Session> {
        reject_invalid(validate_register(form))?;

        let result = self.auth.register(form.email.trim(), &form.password).await;
        self.settle_auth(result).await
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.auth.logout().await.map_err(|e| {
            tracing::error!(error = %e, "Sign-out failed");
            AppError::Failed(messages::UNEXPECTED.to_string())
        })?;

        *self.auth_state.write().await = AuthState::Unauthenticated;
        Ok(())
    }

    /// A fresh view model, as created when the watchlist screen mounts.
    pub fn watchlist(&self) -> WatchlistViewModel {
        WatchlistViewModel::new(self.store.clone())
    }

    pub fn movies(&self) -> MovieService {
        MovieService::new(self.store.clone(), self.objects.clone())
    }

    pub fn catalog(&self) -> Arc<dyn CatalogApi> {
        self.catalog.clone()
    }

    pub fn catalog_search(&self) -> CatalogSearch {
        CatalogSearch::new(self.catalog.clone(), self.search_debounce)
    }

    /// Flushes pending catalog cache writes.
    pub async fn shutdown(&self) {
        if let Some(handle) = self.cache_writer.lock().await.take() {
            handle.shutdown().await;
        }
    }

    async fn settle_auth(
        &self,
        result: Result<Session, crate::services::auth::AuthErrorKind>,
    ) -> AppResult<Session> {
        let mut state = self.auth_state.write().await;
        match result {
            Ok(session) => {
                *state = AuthState::Authenticated(session.clone());
                Ok(session)
            }
            Err(kind) => {
                // An existing session survives a failed attempt to switch accounts.
                if !matches!(*state, AuthState::Authenticated(_)) {
                    *state = AuthState::Unauthenticated;
                }
                Err(AppError::Auth(kind))
            }
        }
    }
}

fn reject_invalid(errors: Vec<FieldError>) -> AppResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}
