use std::sync::Arc;

use review_store::models::{NewRestaurant, NewReview, Restaurant, Review, ReviewStats};
use review_store::schema::{
    DEFINE_SCHEMA,
    RESTAURANT_FIELDS,
    REVIEW_FIELDS,
    TABLE_ID_COUNTER,
    TABLE_RESTAURANT,
    TABLE_REVIEW,
};
use surrealdb::engine::any::Any;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SurrealDB error: {0}")]
    Surreal(Box<surrealdb::Error>),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<surrealdb::Error> for StoreError {
    fn from(err: surrealdb::Error) -> Self {
        Self::Surreal(Box::new(err))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Restaurant and review persistence over a shared `SurrealDB` client.
///
/// Clones share the client. Creates never wait on each other: each one
/// allocates its own id and writes and reads back only that record.
#[derive(Clone)]
pub struct SurrealReviewStore {
    db: Arc<Surreal<Any>>,
}

impl SurrealReviewStore {
    #[must_use]
    pub fn new(db: Surreal<Any>) -> Self {
        Self::from_arc(Arc::new(db))
    }

    #[must_use]
    pub fn from_arc(db: Arc<Surreal<Any>>) -> Self {
        Self { db }
    }

    /// Defines the review tables and the restaurant index if they are missing.
    ///
    /// # Errors
    /// Returns `StoreError` if any definition statement fails.
    pub async fn define_schema(&self) -> StoreResult<()> {
        self.db.query(DEFINE_SCHEMA).await?.check()?;
        Ok(())
    }

    /// Lists every restaurant.
    ///
    /// # Errors
    /// Returns `StoreError` if the database query fails.
    pub async fn list_restaurants(&self) -> StoreResult<Vec<Restaurant>> {
        let query = format!("SELECT {RESTAURANT_FIELDS} FROM {TABLE_RESTAURANT};");
        let mut response = self.db.query(query).await?;
        let records: Vec<Restaurant> = response.take(0)?;
        Ok(records)
    }

    /// Groups reviews by restaurant id with their count and rating total.
    ///
    /// Only restaurant ids that have at least one review appear in the result.
    ///
    /// # Errors
    /// Returns `StoreError` if the database query fails.
    pub async fn list_review_stats(&self) -> StoreResult<Vec<ReviewStats>> {
        let query = format!(
            "SELECT restaurant, count() AS review_count, math::sum(rating) AS rating_total FROM {TABLE_REVIEW} GROUP BY restaurant;"
        );
        let mut response = self.db.query(query).await?;
        let records: Vec<ReviewStats> = response.take(0)?;
        Ok(records)
    }

    /// Fetches a restaurant by id.
    ///
    /// # Errors
    /// Returns `StoreError` if the database query fails.
    pub async fn get_restaurant(&self, restaurant_id: i64) -> StoreResult<Option<Restaurant>> {
        let query = format!("SELECT {RESTAURANT_FIELDS} FROM $record;");
        let mut response = self
            .db
            .query(query)
            .bind(("record", restaurant_record(restaurant_id)))
            .await?;
        let mut records: Vec<Restaurant> = response.take(0)?;
        Ok(records.pop())
    }

    /// Lists reviews that reference a restaurant id, ordered by review id.
    ///
    /// # Errors
    /// Returns `StoreError` if the database query fails.
    pub async fn list_reviews_for_restaurant(&self, restaurant_id: i64) -> StoreResult<Vec<Review>> {
        let query = format!("SELECT {REVIEW_FIELDS} FROM {TABLE_REVIEW} WHERE restaurant = $restaurant;");
        let mut response = self
            .db
            .query(query)
            .bind(("restaurant", restaurant_id))
            .await?;
        let mut records: Vec<Review> = response.take(0)?;
        records.sort_by_key(|review| review.id);
        Ok(records)
    }

    /// Creates a restaurant under a freshly allocated id and reads it back.
    ///
    /// # Errors
    /// Returns `StoreError` if id allocation, the write, or the read-back fails.
    pub async fn create_restaurant(&self, restaurant: NewRestaurant) -> StoreResult<Restaurant> {
        let id = self.next_id(TABLE_RESTAURANT).await?;
        let query = format!(
            "CREATE $record CONTENT $content RETURN NONE; SELECT {RESTAURANT_FIELDS} FROM $record;"
        );
        let mut response = self
            .db
            .query(query)
            .bind(("record", restaurant_record(id)))
            .bind(("content", restaurant))
            .await?
            .check()?;
        let mut records: Vec<Restaurant> = response.take(1)?;
        require_record(records.pop(), TABLE_RESTAURANT)
    }

    /// Creates a review under a freshly allocated id and reads it back.
    ///
    /// The referenced restaurant is not checked here.
    ///
    /// # Errors
    /// Returns `StoreError` if id allocation, the write, or the read-back fails.
    pub async fn create_review(&self, review: NewReview) -> StoreResult<Review> {
        let id = self.next_id(TABLE_REVIEW).await?;
        let query = format!(
            "CREATE $record CONTENT $content RETURN NONE; SELECT {REVIEW_FIELDS} FROM $record;"
        );
        let mut response = self
            .db
            .query(query)
            .bind(("record", RecordId::from_table_key(TABLE_REVIEW, id)))
            .bind(("content", review))
            .await?
            .check()?;
        let mut records: Vec<Review> = response.take(1)?;
        require_record(records.pop(), TABLE_REVIEW)
    }

    /// Allocates the next id for a table.
    ///
    /// The increment is a single upsert statement, so concurrent allocations
    /// never observe the same value.
    async fn next_id(&self, table: &str) -> StoreResult<i64> {
        let query = "UPSERT ONLY $counter SET last_id = (last_id ?? 0) + 1 RETURN VALUE last_id;";
        let mut response = self
            .db
            .query(query)
            .bind(("counter", RecordId::from_table_key(TABLE_ID_COUNTER, table.to_string())))
            .await?;
        let id: Option<i64> = response.take(0)?;
        id.ok_or_else(|| {
            StoreError::InvalidInput(format!("No id allocated for {table}"))
        })
    }
}

fn restaurant_record(restaurant_id: i64) -> RecordId {
    RecordId::from_table_key(TABLE_RESTAURANT, restaurant_id)
}

fn require_record<T>(record: Option<T>, table: &str) -> StoreResult<T> {
    record.ok_or_else(|| {
        StoreError::InvalidInput(format!(
            "No record returned when creating {table}"
        ))
    })
}
