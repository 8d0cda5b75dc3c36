//! HTTP retrieval with content-type classification.
//!
//! One [`HttpClient`] is built at startup and shared by every fetch call. It
//! follows redirects up to the configured limit, sends a fixed identifying
//! user agent, and enforces the end-to-end request timeout so a hanging
//! remote cannot stall a worker.

use crate::error::FetchError;
use crate::types::RetrievedDocument;
use concierge_config::FetchConfig;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Number of leading characters inspected for the `<html` sniff.
const HTML_SNIFF_CHARS: usize = 100;

/// Outbound HTTP client for the fetch tool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a client from the fetch configuration.
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(
                config.max_redirects as usize,
            ))
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetches `url` and classifies the response as HTML or raw.
    ///
    /// # Errors
    ///
    /// * [`FetchError::InvalidUrl`] - malformed URL or non-HTTP(S) scheme
    /// * [`FetchError::Network`] - transport failure or timeout
    /// * [`FetchError::HttpStatus`] - response status was 400 or above
    #[instrument(skip(self))]
    pub async fn retrieve(&self, url: &str) -> Result<RetrievedDocument, FetchError> {
        let validated = validate_url(url)?;

        let response = self
            .client
            .get(validated)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let is_html = classify_html(&content_type, &body);
        debug!(
            content_type = %content_type,
            is_html,
            chars = body.chars().count(),
            "retrieved document"
        );

        Ok(RetrievedDocument {
            body,
            content_type,
            is_html,
        })
    }
}

/// Validates URL shape and scheme before any request is made.
fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme: {scheme}"),
        }),
    }
}

/// Union-of-signals HTML sniff.
///
/// A response counts as HTML when the `content-type` header contains
/// `text/html`, when the header is absent, or when the literal `<html`
/// appears in the first 100 characters of the body. Servers frequently omit
/// or mis-set the header, which is why the body sniff exists. The heuristic
/// is deliberately kept as-is: XHTML that does not mention `<html` within the
/// first 100 characters is classified as raw.
pub(crate) fn classify_html(content_type: &str, body: &str) -> bool {
    if content_type.contains("text/html") {
        return true;
    }
    if content_type.is_empty() {
        return true;
    }
    let prefix: String = body.chars().take(HTML_SNIFF_CHARS).collect();
    prefix.contains("<html")
}
