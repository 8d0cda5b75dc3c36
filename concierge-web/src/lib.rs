//! Concierge Web
//!
//! Core crate for the fetch pipeline: URL retrieval with content-type
//! classification, readable extraction with HTML-to-markdown conversion, and
//! character-window pagination with continuation hints.
//!
//! This crate contains pure web domain logic with no MCP protocol
//! dependency. The MCP tool adapters live in `concierge-tools`.

pub mod client;
pub mod error;
pub mod extract;
pub mod page;
pub mod types;

// Re-export key types
pub use client::HttpClient;
pub use error::FetchError;
pub use extract::{ContentNormalizer, SIMPLIFY_FAILED};
pub use page::{window, NO_MORE_CONTENT};
pub use types::{
    FetchRequest, NormalizedContent, PageWindow, RetrievedDocument, DEFAULT_MAX_LENGTH,
    MAX_LENGTH_LIMIT,
};
