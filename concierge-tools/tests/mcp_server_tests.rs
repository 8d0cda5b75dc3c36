//! End-to-end tests for the MCP server: tool dispatch through the registry
//! with a stubbed remote site.

use concierge_config::ServerConfig;
use concierge_tools::mcp::McpServer;
use rmcp::model::{CallToolResult, RawContent};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_server() -> McpServer {
    let mut config = ServerConfig::default();
    config.auth.token = "test-token".to_string();
    config.identity.number = "916366797779".to_string();
    McpServer::new(Arc::new(config))
}

fn response_text(result: &CallToolResult) -> String {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        _ => panic!("expected text content"),
    }
}

#[test]
fn listed_tools_carry_schemas_and_descriptions() {
    let server = test_server();
    let tools = server.list_tools();
    assert_eq!(tools.len(), 3);

    for tool in &tools {
        assert!(
            tool.description
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty()),
            "tool {} has no description",
            tool.name
        );
        assert!(!tool.input_schema.is_empty(), "tool {} has no schema", tool.name);
    }
}

#[tokio::test]
async fn fetch_paginates_a_document_across_calls() {
    let remote = MockServer::start().await;
    let body: String = ('a'..='z').cycle().take(400).collect();
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.clone(), "text/plain"))
        .mount(&remote)
        .await;

    let server = test_server();
    let url = format!("{}/doc", remote.uri());

    let first = server
        .execute_tool(
            "fetch",
            serde_json::json!({"url": url, "max_length": 150}),
        )
        .await
        .unwrap();
    let first_text = response_text(&first);
    assert!(first_text.contains(&format!("Contents of {url}:")));
    assert!(first_text.contains("start_index of 150"));

    let second = server
        .execute_tool(
            "fetch",
            serde_json::json!({"url": url, "max_length": 150, "start_index": 150}),
        )
        .await
        .unwrap();
    let second_text = response_text(&second);
    assert!(second_text.contains(&body[150..300]));

    let past_end = server
        .execute_tool(
            "fetch",
            serde_json::json!({"url": url, "start_index": 400}),
        )
        .await
        .unwrap();
    assert!(response_text(&past_end).contains("<e>No more content available.</e>"));
}

#[tokio::test]
async fn fetch_surfaces_remote_failures_as_errors() {
    let remote = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&remote)
        .await;

    let server = test_server();
    let err = server
        .execute_tool(
            "fetch",
            serde_json::json!({"url": format!("{}/broken", remote.uri())}),
        )
        .await
        .unwrap_err();
    assert!(err.message.contains("status code 500"));
}

#[tokio::test]
async fn fetch_rejects_out_of_range_max_length() {
    let server = test_server();
    let err = server
        .execute_tool(
            "fetch",
            serde_json::json!({"url": "https://example.com", "max_length": 1000000}),
        )
        .await
        .unwrap_err();
    assert!(err.message.contains("max_length"));
}

#[tokio::test]
async fn validate_returns_the_identity_number() {
    let server = test_server();
    let result = server
        .execute_tool("validate", serde_json::json!({}))
        .await
        .unwrap();
    assert_eq!(response_text(&result), "916366797779");
}

#[tokio::test]
async fn resume_serves_markdown_without_a_document() {
    let server = test_server();
    let result = server
        .execute_tool("resume", serde_json::json!({"name": "Reviewer"}))
        .await
        .unwrap();
    let text = response_text(&result);
    assert!(text.starts_with("# Resume"));
    assert!(text.contains("Hello Reviewer!"));
}
