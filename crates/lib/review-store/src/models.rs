use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A restaurant as stored and returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub street_address: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Content written when a restaurant is created; the id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub street_address: String,
    pub description: Option<String>,
}

/// A review attached to a restaurant by its integer id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub restaurant: i64,
    pub user_name: String,
    pub rating: i64,
    pub review_text: String,
    pub review_date: DateTime<Utc>,
}

/// Content written when a review is created; the id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewReview {
    pub restaurant: i64,
    pub user_name: String,
    pub rating: i64,
    pub review_text: String,
    pub review_date: DateTime<Utc>,
}

/// Restaurant fields flattened together with its review aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantSummary {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub avg_rating: Option<f64>,
    pub review_count: u64,
    pub stars_percent: i64,
}

/// A restaurant with every review that references it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestaurantDetails {
    pub restaurant: Restaurant,
    pub reviews: Vec<Review>,
}

/// One grouped aggregate row: review count and rating total for a restaurant id.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReviewStats {
    pub restaurant: i64,
    pub review_count: i64,
    #[serde(default)]
    pub rating_total: f64,
}
