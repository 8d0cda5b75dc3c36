//! Concierge Tools
//!
//! MCP surface for the Concierge server: the bearer token gate, the tool
//! registry, the `rmcp` server handler, the streamable HTTP transport, and
//! the tool implementations (`fetch`, `resume`, `validate`).

pub mod mcp;

/// Crate version, reported to MCP clients during initialization.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
