//! Tool registry for MCP operations
//!
//! Registry pattern for managing MCP tools:
//!
//! 1. **McpTool Trait**: the interface every tool implements
//! 2. **ToolRegistry**: stores tool instances and resolves them by name
//! 3. **ToolContext**: shared read-only state handed to every execution
//! 4. **BaseToolImpl**: common helpers for argument parsing and responses
//!
//! Tools are stateless and self-describing: each provides its own name,
//! description (loaded from a `description.md` next to the implementation
//! via `include_str!`), and JSON schema. Invocations are independent units
//! of work, so the context carries only immutable startup state and no
//! synchronization is needed.

use concierge_config::ServerConfig;
use concierge_web::HttpClient;
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::ErrorData as McpError;
use std::collections::HashMap;
use std::sync::Arc;

/// Context shared by all tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Server configuration, fixed at startup.
    pub config: Arc<ServerConfig>,
    /// Outbound HTTP client shared by every fetch invocation.
    pub http_client: Arc<HttpClient>,
}

impl ToolContext {
    /// Create a new tool context from the server configuration.
    pub fn new(config: Arc<ServerConfig>) -> Self {
        let http_client = Arc::new(HttpClient::new(&config.fetch));
        Self {
            config,
            http_client,
        }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's unique identifier name
    fn name(&self) -> &'static str;

    /// Get the tool's human-readable description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for argument validation
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
///
/// HashMap-based lookup keyed by tool name. The registry is built once at
/// startup and never mutated afterwards, so it is shared behind a plain
/// `Arc`.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool in the registry
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// List all registered tool names
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Get all registered tools as Tool objects for the MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .values()
            .map(|tool| {
                let schema = tool.schema();
                let schema_map = if let serde_json::Value::Object(map) = schema {
                    map
                } else {
                    serde_json::Map::new()
                };

                Tool::new(tool.name(), tool.description(), Arc::new(schema_map))
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct.
    ///
    /// Malformed or out-of-range arguments surface as an invalid-params
    /// error, never as an internal one.
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_params(format!("Invalid arguments: {e}"), None))
    }

    /// Create a success response carrying a single text block
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent {
                    text: content.into(),
                    meta: None,
                }),
                None,
            )],
            structured_content: None,
            meta: None,
            is_error: Some(false),
        }
    }
}
