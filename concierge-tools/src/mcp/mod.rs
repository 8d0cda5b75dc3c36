//! MCP server support for Concierge
//!
//! The pieces fit together as: the HTTP transport ([`http_server`]) admits a
//! request only after the token gate ([`auth`]) accepts its bearer
//! credential, then the `rmcp` handler ([`server`]) dispatches the named tool
//! through the registry ([`tool_registry`]) to the implementations in
//! [`tools`].

pub mod auth;
pub mod http_server;
pub mod server;
pub mod tool_registry;
pub mod tools;

pub use auth::{AuthError, Identity, TokenGate};
pub use http_server::{start_http_server, McpServerHandle, ServeError};
pub use server::McpServer;
pub use tool_registry::{BaseToolImpl, McpTool, ToolContext, ToolRegistry};
