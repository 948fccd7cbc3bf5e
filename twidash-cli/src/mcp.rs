//! MCP Server implementation for twidash.

use std::sync::Arc;

use rmcp::{
    ServerHandler, tool, tool_handler, tool_router,
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    ErrorData as McpError,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use twidash::{Dashboard, TwitterClient};

use crate::config::{self, CredentialOverrides};
use crate::handlers::dashboard as handler;

/// MCP Server holding one dashboard for the life of the process.
#[derive(Clone)]
pub struct DashboardMcpServer {
    dashboard: Arc<Dashboard<TwitterClient>>,
    tool_router: ToolRouter<Self>,
}

impl DashboardMcpServer {
    pub fn new(dashboard: Dashboard<TwitterClient>) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            tool_router: Self::tool_router(),
        }
    }

    fn to_json<T: Serialize>(value: &T) -> Result<String, McpError> {
        serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))
    }

    fn ok(text: String) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    fn fail(e: anyhow::Error) -> McpError {
        let message = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<twidash::Error>())
            .and_then(twidash::Error::info)
            .map(|info| format!("{} ({:#})", info, e))
            .unwrap_or_else(|| format!("{:#}", e));
        McpError::internal_error(message, None)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatusParams {
    /// Status text
    pub text: String,
}

#[tool_router]
impl DashboardMcpServer {
    #[tool(description = "Fetch account profile, followed accounts, recent statuses and direct messages, and cache the result")]
    async fn dashboard_refresh(&self) -> Result<CallToolResult, McpError> {
        let info = handler::refresh(&*self.dashboard).await.map_err(Self::fail)?;
        Self::ok(Self::to_json(&info)?)
    }

    #[tool(description = "Return the cached dashboard, fetching it first if nothing is cached")]
    async fn dashboard_cached(&self) -> Result<CallToolResult, McpError> {
        let info = handler::cached(&*self.dashboard).await.map_err(Self::fail)?;
        Self::ok(Self::to_json(&info)?)
    }

    #[tool(description = "Post a status and put it at the top of the cached dashboard")]
    async fn status_post(&self, params: Parameters<StatusParams>) -> Result<CallToolResult, McpError> {
        let info = handler::post_status(&*self.dashboard, &params.0.text)
            .await
            .map_err(Self::fail)?;
        Self::ok(Self::to_json(&info)?)
    }
}

#[tool_handler]
impl ServerHandler for DashboardMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: None }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "twidash-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            ..Default::default()
        }
    }
}

/// Run the MCP Server.
pub async fn run_server(overrides: CredentialOverrides) -> anyhow::Result<()> {
    use rmcp::transport::io::stdio;

    tracing::info!("Starting twidash MCP server");

    let dashboard = config::build_dashboard(&overrides)?;
    let server = DashboardMcpServer::new(dashboard);
    let service = rmcp::serve_server(server, stdio()).await?;

    tracing::info!("twidash MCP server ready");
    service.waiting().await?;

    Ok(())
}
