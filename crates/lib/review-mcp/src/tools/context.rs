use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::ReviewsMcp;

/// Payload listing the MCP commands this server exposes.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List the MCP commands this server exposes.".to_string(),
                "health - Returns 'ok'.".to_string(),
                "list_restaurants - List restaurants with avg_rating, review_count, and stars_percent."
                    .to_string(),
                "get_restaurant_details - Fetch a restaurant and its reviews by restaurant_id (null if missing)."
                    .to_string(),
                "create_review - Create a review for restaurant_id with user_name, rating (1-5), and review_text."
                    .to_string(),
                "create_restaurant - Create a restaurant from restaurant_name, street_address, and description."
                    .to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl ReviewsMcp {
    #[tool(description = "List the MCP commands this server exposes.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}
