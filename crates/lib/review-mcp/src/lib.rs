//! MCP server implementation for reviews-mcp.
//!
//! This crate wires the review control plane into rmcp tool handlers and
//! exposes the MCP-facing API surface for listing, looking up, and creating
//! restaurants and reviews.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use review_core::control::ReviewControlPlane;
use review_core::services::ServiceHandle;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};

const SERVER_NAME: &str = "reviews-mcp";
const SERVER_TITLE: &str = "Restaurant Reviews MCP";

const SERVER_INSTRUCTIONS: &str = r"reviews-mcp lists restaurants with review statistics and records new restaurants and reviews.

Tools:
- `list_restaurants` returns every restaurant with `avg_rating` (null without reviews), `review_count`, and `stars_percent` (average as a whole percentage of 5 stars).
- `get_restaurant_details` takes `restaurant_id` and returns `{ restaurant, reviews }`, or null when no such restaurant exists.
- `create_restaurant` takes `restaurant_name`, `street_address`, and `description`; the id is assigned by the server.
- `create_review` takes `restaurant_id`, `user_name`, `rating` (1-5), and `review_text`; the id and `review_date` are assigned by the server.

Notes:
- Ids are integers; use the ids returned by `list_restaurants` or `create_restaurant`.
- Use `help` for a short command list. `health` returns `ok`.";

/// MCP server wrapper around the shared service handle and tool routers.
#[derive(Clone)]
pub struct ReviewsMcp {
    tool_router: ToolRouter<Self>,
    handle: Arc<ServiceHandle>,
}

impl ReviewsMcp {
    /// Creates a new server using a service handle by value.
    #[must_use]
    pub fn new(handle: ServiceHandle) -> Self {
        Self::with_handle(Arc::new(handle))
    }

    /// Creates a new server using a shared service handle.
    #[must_use]
    pub fn with_handle(handle: Arc<ServiceHandle>) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_restaurants()
            + Self::tool_router_context();
        Self {
            tool_router,
            handle,
        }
    }

    pub(crate) fn control(&self) -> ReviewControlPlane {
        self.handle.control()
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl ReviewsMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for ReviewsMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some(SERVER_TITLE.to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use review_core::control::ControlOptions;
    use review_core::services::StoreConfig;

    use super::*;

    pub(crate) async fn build_server(db_name: &str) -> ReviewsMcp {
        let config = StoreConfig::in_memory("reviews", db_name);
        let handle = ServiceHandle::connect(&config, ControlOptions::default())
            .await
            .expect("in-memory connection should succeed");
        ReviewsMcp::new(handle)
    }

    #[tokio::test]
    async fn registers_every_tool() {
        let server = build_server("tool_listing").await;
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "create_restaurant",
                "create_review",
                "get_restaurant_details",
                "health",
                "help",
                "list_restaurants",
            ]
        );
    }

    #[tokio::test]
    async fn instructions_are_advertised() {
        let server = build_server("server_info").await;
        let info = server.get_info();

        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, SERVER_NAME);
        assert_eq!(info.server_info.title.as_deref(), Some(SERVER_TITLE));
        assert!(
            info.instructions
                .as_deref()
                .is_some_and(|text| text.contains("list_restaurants"))
        );
    }
}
