use chrono::Utc;
use review_store::models::{NewRestaurant, NewReview, Restaurant, Review};
use tracing::{info, warn};

use super::{ControlError, ReferentialPolicy, ReviewControlPlane};

/// Input payload for creating a review.
#[derive(Debug, Clone)]
pub struct CreateReviewRequest {
    pub restaurant_id: i64,
    pub user_name: String,
    pub rating: i64,
    pub review_text: String,
}

/// Input payload for creating a restaurant.
#[derive(Debug, Clone)]
pub struct CreateRestaurantRequest {
    pub restaurant_name: String,
    pub street_address: String,
    pub description: Option<String>,
}

impl ReviewControlPlane {
    /// Creates a review stamped with the current time and returns the stored record.
    ///
    /// Under `ReferentialPolicy::Enforce` the restaurant must exist.
    ///
    /// # Errors
    /// Returns `ControlError::UnknownRestaurant` when the restaurant is missing
    /// and references are enforced, or `ControlError` if the store write fails.
    pub async fn create_review(&self, request: CreateReviewRequest) -> Result<Review, ControlError> {
        self.run("create_review", move |store, options| async move {
            let CreateReviewRequest {
                restaurant_id,
                user_name,
                rating,
                review_text,
            } = request;

            if options.referential_policy == ReferentialPolicy::Enforce
                && store.get_restaurant(restaurant_id).await?.is_none()
            {
                warn!(restaurant_id, "rejected review for unknown restaurant");
                return Err(ControlError::UnknownRestaurant(restaurant_id));
            }

            let review = store
                .create_review(NewReview {
                    restaurant: restaurant_id,
                    user_name,
                    rating,
                    review_text,
                    review_date: Utc::now(),
                })
                .await?;
            info!(review_id = review.id, restaurant_id, "created review");
            Ok(review)
        })
        .await
    }

    /// Creates a restaurant and returns the stored record.
    ///
    /// Names and addresses are not required to be unique.
    ///
    /// # Errors
    /// Returns `ControlError` if the store write fails.
    pub async fn create_restaurant(
        &self,
        request: CreateRestaurantRequest,
    ) -> Result<Restaurant, ControlError> {
        self.run("create_restaurant", move |store, _| async move {
            let CreateRestaurantRequest {
                restaurant_name,
                street_address,
                description,
            } = request;

            let restaurant = store
                .create_restaurant(NewRestaurant {
                    name: restaurant_name,
                    street_address,
                    description,
                })
                .await?;
            info!(restaurant_id = restaurant.id, "created restaurant");
            Ok::<_, ControlError>(restaurant)
        })
        .await
    }
}
