use std::future::Future;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::any::Any;
use thiserror::Error;
use tracing::warn;

use crate::store::{StoreError, SurrealReviewStore};

pub mod mutation;
pub mod query;

pub use mutation::{CreateRestaurantRequest, CreateReviewRequest};

#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no such restaurant: {0}")]
    UnknownRestaurant(i64),
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("operation task failed: {0}")]
    Task(String),
}

/// How review creation treats a `restaurant_id` with no matching restaurant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReferentialPolicy {
    /// Reject the review with `ControlError::UnknownRestaurant`.
    #[default]
    Enforce,
    /// Store the review anyway; it will not appear in any aggregate.
    Permissive,
}

/// Tunables shared by every control-plane operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlOptions {
    pub referential_policy: ReferentialPolicy,
    pub operation_timeout: Option<Duration>,
}

impl ControlOptions {
    #[must_use]
    pub const fn with_referential_policy(mut self, policy: ReferentialPolicy) -> Self {
        self.referential_policy = policy;
        self
    }

    #[must_use]
    pub const fn with_operation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.operation_timeout = timeout;
        self
    }
}

/// Query and mutation operations over the review store.
#[derive(Clone)]
pub struct ReviewControlPlane {
    store: SurrealReviewStore,
    options: ControlOptions,
}

impl ReviewControlPlane {
    #[must_use]
    pub fn new(db: Surreal<Any>) -> Self {
        Self::with_store(SurrealReviewStore::new(db))
    }

    #[must_use]
    pub fn with_store(store: SurrealReviewStore) -> Self {
        Self {
            store,
            options: ControlOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: ControlOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs one operation on its own task so a slow store call does not hold
    /// up other callers, applying the configured timeout.
    async fn run<T, F, Fut>(&self, operation: &'static str, op: F) -> Result<T, ControlError>
    where
        F: FnOnce(SurrealReviewStore, ControlOptions) -> Fut,
        Fut: Future<Output = Result<T, ControlError>> + Send + 'static,
        T: Send + 'static,
    {
        let mut task = tokio::spawn(op(self.store.clone(), self.options));
        let joined = match self.options.operation_timeout {
            Some(limit) => {
                if let Ok(joined) = tokio::time::timeout(limit, &mut task).await {
                    joined
                } else {
                    task.abort();
                    warn!(operation, ?limit, "operation timed out");
                    return Err(ControlError::Timeout(limit));
                }
            }
            None => task.await,
        };
        joined.map_err(|err| ControlError::Task(err.to_string()))?
    }
}
