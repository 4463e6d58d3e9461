//! Review aggregate math.
//!
//! The store groups reviews by restaurant; everything here is pure so the
//! join and rounding rules can be checked without a database.

use std::collections::HashMap;

use crate::models::{Restaurant, RestaurantSummary, ReviewStats};

/// Highest rating a review is expected to carry.
pub const MAX_RATING: f64 = 5.0;

/// Mean rating for a group, or `None` when the group is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_rating(rating_total: f64, review_count: u64) -> Option<f64> {
    if review_count == 0 {
        return None;
    }
    Some(rating_total / review_count as f64)
}

/// Average rating as a whole percentage of `MAX_RATING`.
///
/// Ties round half to even. Restaurants without reviews always score 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn stars_percent(avg_rating: Option<f64>, review_count: u64) -> i64 {
    match avg_rating {
        Some(avg) if review_count > 0 => ((avg / MAX_RATING) * 100.0).round_ties_even() as i64,
        _ => 0,
    }
}

/// Left outer join of grouped review stats onto restaurants.
///
/// Every restaurant yields exactly one summary, ordered by id. Stats rows for
/// restaurant ids that do not exist are dropped.
#[must_use]
pub fn summarize(restaurants: Vec<Restaurant>, stats: &[ReviewStats]) -> Vec<RestaurantSummary> {
    let by_restaurant: HashMap<i64, &ReviewStats> =
        stats.iter().map(|row| (row.restaurant, row)).collect();

    let mut summaries: Vec<RestaurantSummary> = restaurants
        .into_iter()
        .map(|restaurant| {
            let (review_count, rating_total) = by_restaurant
                .get(&restaurant.id)
                .map_or((0, 0.0), |row| {
                    (u64::try_from(row.review_count).unwrap_or(0), row.rating_total)
                });
            let avg_rating = average_rating(rating_total, review_count);
            RestaurantSummary {
                restaurant,
                avg_rating,
                review_count,
                stars_percent: stars_percent(avg_rating, review_count),
            }
        })
        .collect();
    summaries.sort_by_key(|summary| summary.restaurant.id);
    summaries
}
