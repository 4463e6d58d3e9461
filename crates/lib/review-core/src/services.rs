use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use thiserror::Error;
use tracing::info;

use crate::control::{ControlOptions, ReviewControlPlane};
use crate::store::SurrealReviewStore;

/// Endpoint used when no remote database is configured.
pub const IN_MEMORY_ENDPOINT: &str = "mem://";

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("failed to connect to {endpoint}: {message}")]
    Connect { endpoint: String, message: String },
    #[error("failed to sign in: {0}")]
    SignIn(String),
    #[error("failed to select namespace/database: {0}")]
    Select(String),
    #[error("failed to define schema: {0}")]
    Schema(String),
}

/// Database credentials for a root sign-in.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Where and how the shared store connection is opened.
#[derive(Clone)]
pub struct StoreConfig {
    pub endpoint: String,
    pub namespace: String,
    pub database: String,
    pub credentials: Option<Credentials>,
}

impl StoreConfig {
    pub fn in_memory(namespace: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            endpoint: IN_MEMORY_ENDPOINT.to_string(),
            namespace: namespace.into(),
            database: database.into(),
            credentials: None,
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

/// Process-wide handle over the shared database client.
///
/// Built once at startup; transports clone it (or share it behind an `Arc`)
/// and every operation borrows the same client.
#[derive(Clone)]
pub struct ServiceHandle {
    db: Arc<Surreal<Any>>,
    store: SurrealReviewStore,
    control: ReviewControlPlane,
}

impl ServiceHandle {
    pub fn new(db: Arc<Surreal<Any>>, options: ControlOptions) -> Self {
        let store = SurrealReviewStore::from_arc(db.clone());
        let control = ReviewControlPlane::with_store(store.clone()).with_options(options);
        Self { db, store, control }
    }

    pub fn from_surreal(db: Surreal<Any>, options: ControlOptions) -> Self {
        Self::new(Arc::new(db), options)
    }

    /// Opens the configured database, selects the namespace and database, and
    /// defines the review schema.
    ///
    /// # Errors
    /// Returns `ConnectError` for the first step that fails.
    pub async fn connect(config: &StoreConfig, options: ControlOptions) -> Result<Self, ConnectError> {
        let db = any::connect(config.endpoint.as_str())
            .await
            .map_err(|err| ConnectError::Connect {
                endpoint: config.endpoint.clone(),
                message: err.to_string(),
            })?;

        if let Some(credentials) = config.credentials.as_ref() {
            db.signin(Root {
                username: credentials.username.as_str(),
                password: credentials.password.as_str(),
            })
            .await
            .map_err(|err| ConnectError::SignIn(err.to_string()))?;
        }

        db.use_ns(config.namespace.as_str())
            .use_db(config.database.as_str())
            .await
            .map_err(|err| ConnectError::Select(err.to_string()))?;

        let handle = Self::from_surreal(db, options);
        handle
            .store
            .define_schema()
            .await
            .map_err(|err| ConnectError::Schema(err.to_string()))?;

        info!(
            endpoint = %config.endpoint,
            namespace = %config.namespace,
            database = %config.database,
            "connected review store"
        );
        Ok(handle)
    }

    pub fn db(&self) -> Arc<Surreal<Any>> {
        self.db.clone()
    }

    pub fn control(&self) -> ReviewControlPlane {
        self.control.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connects_in_memory_and_defines_schema() {
        let config = StoreConfig::in_memory("reviews", "services_test");
        let handle = ServiceHandle::connect(&config, ControlOptions::default())
            .await
            .expect("in-memory connection should succeed");

        let summaries = handle
            .control()
            .list_restaurants_with_stats()
            .await
            .expect("empty store should list");
        assert!(summaries.is_empty());
    }

    #[tokio::test]
    async fn clones_share_one_client() {
        let config = StoreConfig::in_memory("reviews", "shared_client");
        let handle = ServiceHandle::connect(&config, ControlOptions::default())
            .await
            .expect("in-memory connection should succeed");
        let other = handle.clone();

        assert!(Arc::ptr_eq(&handle.db(), &other.db()));
    }

    #[tokio::test]
    async fn rejects_unknown_endpoint_scheme() {
        let config = StoreConfig::in_memory("reviews", "bad").with_endpoint("nope://nowhere");
        let result = ServiceHandle::connect(&config, ControlOptions::default()).await;

        assert!(matches!(result, Err(ConnectError::Connect { .. })));
    }
}
