//! Fetch tool: retrieve a URL and return readable content in bounded windows.
//!
//! The pipeline runs retrieval, normalization, and windowing in sequence.
//! Retrieval failures surface to the caller as internal errors carrying the
//! cause; a page that cannot be simplified degrades to a sentinel text
//! rather than failing the call.

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use concierge_web::extract::ContentNormalizer;
use concierge_web::{page, FetchError, FetchRequest, DEFAULT_MAX_LENGTH, MAX_LENGTH_LIMIT};
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

/// Register all fetch-related tools with the registry
pub fn register_fetch_tools(registry: &mut ToolRegistry) {
    registry.register(FetchTool::new());
}

/// Tool for fetching a URL and returning windows of its normalized content
#[derive(Default)]
pub struct FetchTool;

impl FetchTool {
    /// Creates a new instance of the FetchTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl McpTool for FetchTool {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "format": "uri",
                    "description": "URL to fetch"
                },
                "max_length": {
                    "type": "integer",
                    "description": "Max characters to return",
                    "default": DEFAULT_MAX_LENGTH,
                    "exclusiveMinimum": 0,
                    "exclusiveMaximum": MAX_LENGTH_LIMIT
                },
                "start_index": {
                    "type": "integer",
                    "description": "Starting character index for pagination into the normalized content",
                    "default": 0,
                    "minimum": 0
                },
                "raw": {
                    "type": "boolean",
                    "description": "Get raw content without markdown simplification if true",
                    "default": false
                }
            },
            "required": ["url"],
            "additionalProperties": false
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: FetchRequest = BaseToolImpl::parse_arguments(arguments)?;
        let url = request.url.trim();
        if url.is_empty() {
            return Err(McpError::invalid_params("URL is required", None));
        }

        tracing::debug!("Fetching web content from URL: {url}");

        let document = match context.http_client.retrieve(url).await {
            Ok(document) => document,
            Err(e @ FetchError::InvalidUrl { .. }) => {
                return Err(McpError::invalid_params(e.to_string(), None))
            }
            Err(e) => return Err(McpError::internal_error(e.to_string(), None)),
        };

        let normalizer = ContentNormalizer::new(context.config.fetch.max_line_width);
        let normalized = normalizer.normalize(&document, request.raw);
        let window = page::window(&normalized.text, request.start_index, request.max_length);

        let prefix = normalized.prefix_note.unwrap_or_default();
        Ok(BaseToolImpl::create_success_response(format!(
            "{prefix}Contents of {url}:\n{}",
            window.text
        )))
    }
}
