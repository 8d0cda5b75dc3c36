//! Validate tool: return the identity number for platform validation.

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

/// Register all validation-related tools with the registry
pub fn register_validate_tools(registry: &mut ToolRegistry) {
    registry.register(ValidateTool::new());
}

/// Tool returning the configured identity number
#[derive(Default)]
pub struct ValidateTool;

impl ValidateTool {
    /// Creates a new instance of the ValidateTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl McpTool for ValidateTool {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": [],
            "additionalProperties": false
        })
    }

    async fn execute(
        &self,
        _arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let number = context.config.identity.number.clone();
        tracing::debug!("validate tool returning identity number");
        Ok(BaseToolImpl::create_success_response(number))
    }
}
