//! Core types for the fetch pipeline.

use schemars::JsonSchema;
use serde::Deserialize;

/// Default number of characters returned per window.
pub const DEFAULT_MAX_LENGTH: usize = 5000;

/// Exclusive upper bound on the `max_length` parameter.
pub const MAX_LENGTH_LIMIT: usize = 1_000_000;

/// Request to fetch a URL and return one window of its normalized content.
///
/// # Examples
///
/// First page of a document:
/// ```ignore
/// FetchRequest {
///     url: "https://example.com/article".to_string(),
///     max_length: 5000,
///     start_index: 0,
///     raw: false,
/// }
/// ```
///
/// Continuing a truncated document from the offset named in the previous
/// window's continuation notice:
/// ```ignore
/// FetchRequest {
///     url: "https://example.com/article".to_string(),
///     max_length: 5000,
///     start_index: 5000,
///     raw: false,
/// }
/// ```
#[derive(Debug, Clone, JsonSchema)]
pub struct FetchRequest {
    /// The URL to fetch (absolute HTTP/HTTPS URL)
    pub url: String,
    /// Maximum number of characters to return (default 5000)
    pub max_length: usize,
    /// Starting character index into the normalized content (default 0)
    pub start_index: usize,
    /// Return verbatim content without markdown simplification (default false)
    pub raw: bool,
}

impl<'de> Deserialize<'de> for FetchRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        struct FetchRequestHelper {
            url: String,
            max_length: Option<usize>,
            start_index: Option<usize>,
            raw: Option<bool>,
        }

        let helper = FetchRequestHelper::deserialize(deserializer)?;

        let max_length = helper.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
        if max_length == 0 || max_length >= MAX_LENGTH_LIMIT {
            return Err(Error::custom(format!(
                "max_length must be greater than 0 and less than {MAX_LENGTH_LIMIT}"
            )));
        }

        Ok(FetchRequest {
            url: helper.url,
            max_length,
            start_index: helper.start_index.unwrap_or(0),
            raw: helper.raw.unwrap_or(false),
        })
    }
}

/// Document returned by the HTTP retriever.
///
/// Lives only for the duration of one fetch call; nothing is cached.
#[derive(Debug, Clone)]
pub struct RetrievedDocument {
    /// Decoded response body.
    pub body: String,
    /// The `content-type` header value, empty when the header was absent.
    pub content_type: String,
    /// Whether the document was classified as HTML (header plus body sniff).
    pub is_html: bool,
}

/// Normalized form of a retrieved document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedContent {
    /// Markdown-simplified text, or the raw body when simplification was
    /// skipped.
    pub text: String,
    /// Present exactly when `text` is not markdown-simplified HTML,
    /// explaining why raw content is being returned.
    pub prefix_note: Option<String>,
}

/// One caller-visible window of normalized content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// The windowed text, including the continuation notice when truncated.
    pub text: String,
    /// Character offset to pass as `start_index` on the next call; present
    /// iff more content remains beyond this window.
    pub continuation_offset: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<FetchRequest, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn defaults_are_applied() {
        let request = parse(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(request.url, "https://example.com");
        assert_eq!(request.max_length, DEFAULT_MAX_LENGTH);
        assert_eq!(request.start_index, 0);
        assert!(!request.raw);
    }

    #[test]
    fn explicit_values_are_kept() {
        let request = parse(
            r#"{"url": "https://example.com", "max_length": 50, "start_index": 10, "raw": true}"#,
        )
        .unwrap();
        assert_eq!(request.max_length, 50);
        assert_eq!(request.start_index, 10);
        assert!(request.raw);
    }

    #[test]
    fn url_is_required() {
        assert!(parse(r#"{"max_length": 50}"#).is_err());
    }

    #[test]
    fn max_length_bounds_are_exclusive() {
        assert!(parse(r#"{"url": "https://example.com", "max_length": 0}"#).is_err());
        assert!(parse(r#"{"url": "https://example.com", "max_length": 1000000}"#).is_err());
        assert!(parse(r#"{"url": "https://example.com", "max_length": 999999}"#).is_ok());
        assert!(parse(r#"{"url": "https://example.com", "max_length": 1}"#).is_ok());
    }

    #[test]
    fn negative_start_index_is_rejected() {
        assert!(parse(r#"{"url": "https://example.com", "start_index": -1}"#).is_err());
    }
}
