//! MCP server implementation for serving Concierge tools

use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

use concierge_config::ServerConfig;

use super::tool_registry::{ToolContext, ToolRegistry};
use super::tools::{register_fetch_tools, register_resume_tools, register_validate_tools};

/// Server instructions displayed to MCP clients
const SERVER_INSTRUCTIONS: &str =
    "Personal concierge: fetch web pages as readable markdown, serve the resume, validate server identity.";

/// MCP server for all Concierge functionality.
///
/// Holds the tool registry and the shared tool context, both built once at
/// startup and immutable afterwards. Authentication happens at the transport
/// boundary; by the time a request reaches this handler its bearer
/// credential has already been accepted.
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    tool_context: Arc<ToolContext>,
}

/// Create ServerCapabilities for the MCP protocol
fn create_server_capabilities() -> ServerCapabilities {
    ServerCapabilities::builder().enable_tools().build()
}

/// Create Implementation information for the MCP server
fn create_server_implementation() -> Implementation {
    Implementation {
        name: "Concierge".into(),
        version: crate::VERSION.into(),
        icons: None,
        title: Some("Concierge MCP Server".into()),
        website_url: None,
    }
}

impl McpServer {
    /// Create a new MCP server with all tools registered.
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let mut tool_registry = ToolRegistry::new();
        Self::register_all_tools(&mut tool_registry);

        Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(ToolContext::new(config)),
        }
    }

    /// Register all available tools in the tool registry.
    fn register_all_tools(tool_registry: &mut ToolRegistry) {
        register_fetch_tools(tool_registry);
        register_resume_tools(tool_registry);
        register_validate_tools(tool_registry);
        tracing::debug!("Registered {} tool handlers", tool_registry.len());
    }

    /// List all available tools from the tool registry.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_registry.list_tools()
    }

    /// Check whether a tool with the given name is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tool_registry.get_tool(name).is_some()
    }

    /// Execute a tool by name with the given arguments.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the tool to execute
    /// * `arguments` - The arguments to pass to the tool
    ///
    /// # Returns
    ///
    /// * `Result<CallToolResult, McpError>` - The tool execution result
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<CallToolResult, McpError> {
        let tool = self
            .tool_registry
            .get_tool(name)
            .ok_or_else(|| McpError::invalid_request(format!("Unknown tool: {name}"), None))?;

        let arguments_map = match arguments {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        tool.execute(arguments_map, &self.tool_context).await
    }
}

impl ServerHandler for McpServer {
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<InitializeResult, McpError> {
        tracing::info!(
            "MCP client connecting: {} v{}",
            request.client_info.name,
            request.client_info.version
        );

        Ok(InitializeResult {
            protocol_version: ProtocolVersion::default(),
            capabilities: create_server_capabilities(),
            instructions: Some(SERVER_INSTRUCTIONS.into()),
            server_info: create_server_implementation(),
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        tracing::debug!(
            "call_tool() invoked for tool: {}, arguments: {:?}",
            request.name,
            request.arguments
        );

        let tool = self.tool_registry.get_tool(&request.name).ok_or_else(|| {
            tracing::warn!("Unknown tool requested: {}", request.name);
            McpError::invalid_request(format!("Unknown tool: {}", request.name), None)
        })?;

        let arguments = request.arguments.unwrap_or_default();
        tracing::info!("Executing tool: {}", request.name);
        tool.execute(arguments, &self.tool_context).await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: create_server_capabilities(),
            server_info: create_server_implementation(),
            instructions: Some(SERVER_INSTRUCTIONS.into()),
        }
    }
}
