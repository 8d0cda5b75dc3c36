//! Tool implementations for the Concierge MCP server
//!
//! Each tool lives in its own submodule with a dedicated implementation and
//! description file:
//!
//! - **fetch**: retrieve a URL and return one window of its readable content
//! - **resume**: serve the resume as plain markdown
//! - **validate**: return the identity number for platform validation

pub mod fetch;
pub mod resume;
pub mod validate;

pub use fetch::register_fetch_tools;
pub use resume::register_resume_tools;
pub use validate::register_validate_tools;
