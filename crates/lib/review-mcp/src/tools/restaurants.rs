use review_core::control::{CreateRestaurantRequest, CreateReviewRequest};
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{ReviewsMcp, helpers};

/// Parameters for fetching a restaurant with its reviews.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetRestaurantDetailsParams {
    pub restaurant_id: i64,
}

/// Parameters for creating a review.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateReviewParams {
    pub restaurant_id: i64,
    pub user_name: String,
    /// Expected to be between 1 and 5.
    pub rating: i64,
    pub review_text: String,
}

/// Parameters for creating a restaurant.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateRestaurantParams {
    pub restaurant_name: String,
    pub street_address: String,
    pub description: Option<String>,
}

#[tool_router(router = tool_router_restaurants, vis = "pub")]
impl ReviewsMcp {
    #[tool(description = "List restaurants with their average rating, review count, and stars percent.")]
    async fn list_restaurants(&self) -> Result<CallToolResult, ErrorData> {
        let summaries = self
            .control()
            .list_restaurants_with_stats()
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(summaries)?]))
    }

    #[tool(description = "Return a restaurant and all of its reviews. Returns null when the restaurant does not exist.")]
    async fn get_restaurant_details(
        &self,
        Parameters(params): Parameters<GetRestaurantDetailsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let details = self
            .control()
            .get_restaurant_details(params.restaurant_id)
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(details)?]))
    }

    #[tool(description = "Create a new review for a restaurant and return the created review.")]
    async fn create_review(
        &self,
        Parameters(params): Parameters<CreateReviewParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let review = self
            .control()
            .create_review(CreateReviewRequest {
                restaurant_id: params.restaurant_id,
                user_name: params.user_name,
                rating: params.rating,
                review_text: params.review_text,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(review)?]))
    }

    #[tool(description = "Create a new restaurant and return the created restaurant.")]
    async fn create_restaurant(
        &self,
        Parameters(params): Parameters<CreateRestaurantParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let restaurant = self
            .control()
            .create_restaurant(CreateRestaurantRequest {
                restaurant_name: params.restaurant_name,
                street_address: params.street_address,
                description: params.description,
            })
            .await
            .map_err(helpers::map_err)?;
        Ok(CallToolResult::success(vec![Content::json(restaurant)?]))
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;
    use serde_json::{Value, json};

    use super::*;
    use crate::tests::build_server;

    fn payload(result: &CallToolResult) -> Value {
        let text = result
            .content
            .first()
            .and_then(|content| content.raw.as_text())
            .expect("tool should return text content");
        serde_json::from_str(&text.text).expect("tool output should be JSON")
    }

    async fn add_restaurant(server: &ReviewsMcp, name: &str) -> Value {
        let result = server
            .create_restaurant(Parameters(CreateRestaurantParams {
                restaurant_name: name.to_string(),
                street_address: "1 Main St".to_string(),
                description: Some("Tacos".to_string()),
            }))
            .await
            .expect("create_restaurant should succeed");
        payload(&result)
    }

    #[tokio::test]
    async fn missing_restaurant_details_are_null() {
        let server = build_server("tool_details_missing").await;

        let result = server
            .get_restaurant_details(Parameters(GetRestaurantDetailsParams { restaurant_id: 42 }))
            .await
            .expect("lookup of a missing restaurant is not an error");

        assert_eq!(payload(&result), Value::Null);
    }

    #[tokio::test]
    async fn orphan_review_is_invalid_params() {
        let server = build_server("tool_orphan_review").await;

        let err = server
            .create_review(Parameters(CreateReviewParams {
                restaurant_id: 5,
                user_name: "ghost".to_string(),
                rating: 4,
                review_text: "nowhere".to_string(),
            }))
            .await
            .err()
            .expect("review for a missing restaurant should be rejected");

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(err.message, "no such restaurant: 5");
    }

    #[tokio::test]
    async fn list_restaurants_flattens_summary_fields() {
        let server = build_server("tool_list_flat").await;
        let created = add_restaurant(&server, "Corner Taqueria").await;
        assert_eq!(
            created,
            json!({
                "id": 1,
                "name": "Corner Taqueria",
                "street_address": "1 Main St",
                "description": "Tacos",
            })
        );

        let result = server
            .list_restaurants()
            .await
            .expect("list_restaurants should succeed");

        assert_eq!(
            payload(&result),
            json!([{
                "id": 1,
                "name": "Corner Taqueria",
                "street_address": "1 Main St",
                "description": "Tacos",
                "avg_rating": null,
                "review_count": 0,
                "stars_percent": 0,
            }])
        );
    }

    #[tokio::test]
    async fn created_review_shows_up_in_details_and_stats() {
        let server = build_server("tool_review_flow").await;
        add_restaurant(&server, "Corner Taqueria").await;

        let review = server
            .create_review(Parameters(CreateReviewParams {
                restaurant_id: 1,
                user_name: "sam".to_string(),
                rating: 4,
                review_text: "solid al pastor".to_string(),
            }))
            .await
            .expect("create_review should succeed");
        let review = payload(&review);
        assert_eq!(review["id"], json!(1));
        assert_eq!(review["restaurant"], json!(1));
        assert!(review["review_date"].is_string());

        let details = server
            .get_restaurant_details(Parameters(GetRestaurantDetailsParams { restaurant_id: 1 }))
            .await
            .expect("lookup should succeed");
        let details = payload(&details);
        assert_eq!(details["restaurant"]["name"], json!("Corner Taqueria"));
        assert_eq!(details["reviews"], json!([review]));

        let listed = server
            .list_restaurants()
            .await
            .expect("list_restaurants should succeed");
        let listed = payload(&listed);
        assert_eq!(listed[0]["avg_rating"], json!(4.0));
        assert_eq!(listed[0]["review_count"], json!(1));
        assert_eq!(listed[0]["stars_percent"], json!(80));
    }
}
