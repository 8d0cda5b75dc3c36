//! Resume tool: serve the resume as plain markdown.
//!
//! The document comes from the configured path; a missing or unreadable file
//! is recovered locally with a built-in fallback block rather than surfaced
//! as an error.

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;
use std::path::Path;

/// Maximum characters of document content returned before truncation.
const MAX_RESUME_CHARS: usize = 1500;

/// Notice appended when the resume document is truncated.
const TRUNCATION_NOTICE: &str =
    "\n\n[Resume content truncated for brevity - full details available on request]";

/// Register all resume-related tools with the registry
pub fn register_resume_tools(registry: &mut ToolRegistry) {
    registry.register(ResumeTool::new());
}

/// Arguments accepted by the resume tool.
#[derive(Debug, Default, Deserialize)]
pub struct ResumeRequest {
    /// Name of the person requesting the resume
    pub name: Option<String>,
}

/// Tool serving the resume as markdown text
#[derive(Default)]
pub struct ResumeTool;

impl ResumeTool {
    /// Creates a new instance of the ResumeTool
    pub fn new() -> Self {
        Self
    }
}

/// Fallback block served when the configured document is absent.
fn fallback_resume(greeting: &str) -> String {
    format!(
        "# Resume\n\n\
         {greeting}Here is my resume:\n\n\
         **Concierge Operator**\n\n\
         - Software Engineer\n\
         - Projects: personal MCP tooling, web content pipelines\n\
         - Skills: Rust, distributed systems, automation\n\
         - Contact: available on request\n"
    )
}

/// Caps `text` at `limit` characters, appending the truncation notice when
/// content was dropped.
fn cap_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let capped: String = text.chars().take(limit).collect();
    format!("{capped}{TRUNCATION_NOTICE}")
}

async fn load_document(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::warn!(
                "resume document {} not available, using fallback: {e}",
                path.display()
            );
            None
        }
    }
}

#[async_trait::async_trait]
impl McpTool for ResumeTool {
    fn name(&self) -> &'static str {
        "resume"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the person requesting the resume"
                }
            },
            "required": [],
            "additionalProperties": false
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ResumeRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!("resume tool called for: {:?}", request.name);

        let greeting = request
            .name
            .as_deref()
            .map(|name| format!("Hello {name}! "))
            .unwrap_or_default();

        let text = match load_document(&context.config.resume.path).await {
            Some(document) => {
                let capped = cap_chars(document.trim(), MAX_RESUME_CHARS);
                format!("# Resume\n\n{greeting}Here is my resume:\n\n{capped}")
            }
            None => fallback_resume(&greeting),
        };

        tracing::debug!("resume response length: {} characters", text.chars().count());
        Ok(BaseToolImpl::create_success_response(text))
    }
}
