use review_store::models::{RestaurantDetails, RestaurantSummary};
use review_store::stats;
use tracing::debug;

use super::{ControlError, ReviewControlPlane};

impl ReviewControlPlane {
    /// Lists every restaurant with its average rating, review count, and
    /// stars percent, ordered by restaurant id.
    ///
    /// Restaurants without reviews are included with a `None` average.
    ///
    /// # Errors
    /// Returns `ControlError` if a store query fails or the operation times out.
    pub async fn list_restaurants_with_stats(
        &self,
    ) -> Result<Vec<RestaurantSummary>, ControlError> {
        self.run("list_restaurants_with_stats", |store, _| async move {
            let restaurants = store.list_restaurants().await?;
            let review_stats = store.list_review_stats().await?;
            let summaries = stats::summarize(restaurants, &review_stats);
            debug!(restaurants = summaries.len(), "listed restaurants with stats");
            Ok::<_, ControlError>(summaries)
        })
        .await
    }

    /// Fetches a restaurant together with all of its reviews.
    ///
    /// Returns `Ok(None)` when no restaurant has the given id.
    ///
    /// # Errors
    /// Returns `ControlError` if a store query fails or the operation times out.
    pub async fn get_restaurant_details(
        &self,
        restaurant_id: i64,
    ) -> Result<Option<RestaurantDetails>, ControlError> {
        self.run("get_restaurant_details", move |store, _| async move {
            let Some(restaurant) = store.get_restaurant(restaurant_id).await? else {
                debug!(restaurant_id, "restaurant not found");
                return Ok(None);
            };
            let reviews = store.list_reviews_for_restaurant(restaurant_id).await?;
            debug!(restaurant_id, reviews = reviews.len(), "loaded restaurant details");
            Ok::<_, ControlError>(Some(RestaurantDetails { restaurant, reviews }))
        })
        .await
    }
}
