//! Readable extraction: HTML to markdown with preprocessing and cleanup.
//!
//! The pipeline mirrors how a reader sees a page: boilerplate regions are
//! stripped first, the remaining HTML is converted to markdown with
//! ATX-style heading markers, and the output is cleaned of stray whitespace.
//! Extraction failure is a soft degradation: garbled pages on the open web
//! are common, so the caller gets a sentinel string instead of an error.

use crate::types::{NormalizedContent, RetrievedDocument};
use html2text::from_read;
use regex::Regex;
use std::io::Cursor;
use std::sync::OnceLock;

/// Sentinel returned when an HTML page yields no readable content.
pub const SIMPLIFY_FAILED: &str = "<e>Page failed to be simplified from HTML</e>";

/// HTML regions removed before conversion: scripts, styles, comments, and
/// structural boilerplate (navigation, headers, footers, sidebars, ads).
fn boilerplate_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?is)<script\b[^>]*>.*?</script>",
            r"(?is)<style\b[^>]*>.*?</style>",
            r"(?s)<!--.*?-->",
            r"(?is)<nav\b[^>]*>.*?</nav>",
            r"(?is)<header\b[^>]*>.*?</header>",
            r"(?is)<footer\b[^>]*>.*?</footer>",
            r"(?is)<aside\b[^>]*>.*?</aside>",
            r#"(?is)<div\b[^>]*(?:class|id)\s*=\s*"[^"]*\b(?:ad|ads|advert|banner|sponsor)\b[^"]*"[^>]*>.*?</div>"#,
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("invalid boilerplate pattern"))
        .collect()
    })
}

/// Runs of three or more newlines, collapsed to a single blank line.
fn blank_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n{3,}").expect("invalid blank-run pattern"))
}

/// Converts retrieved documents into their normalized textual form.
#[derive(Debug, Clone)]
pub struct ContentNormalizer {
    max_line_width: usize,
}

impl ContentNormalizer {
    /// Creates a normalizer rendering markdown at the given line width.
    pub fn new(max_line_width: usize) -> Self {
        Self { max_line_width }
    }

    /// Normalizes a retrieved document.
    ///
    /// HTML is simplified to markdown unless the caller forced raw output.
    /// Anything else passes through unchanged with a prefix note explaining
    /// why it was not simplified. The note is present exactly when the
    /// returned text is not markdown-simplified HTML.
    pub fn normalize(&self, doc: &RetrievedDocument, force_raw: bool) -> NormalizedContent {
        if force_raw || !doc.is_html {
            return NormalizedContent {
                text: doc.body.clone(),
                prefix_note: Some(format!(
                    "Content type {} cannot be simplified to markdown, but here is the raw content:\n",
                    doc.content_type
                )),
            };
        }

        let text = self
            .extract_markdown(&doc.body)
            .unwrap_or_else(|| SIMPLIFY_FAILED.to_string());
        NormalizedContent {
            text,
            prefix_note: None,
        }
    }

    /// Extracts the readable region of an HTML document as markdown.
    ///
    /// Returns `None` when nothing readable remains after extraction.
    pub fn extract_markdown(&self, html: &str) -> Option<String> {
        if html.trim().is_empty() {
            return None;
        }

        let cleaned = preprocess(html);
        let markdown = from_read(Cursor::new(cleaned.as_bytes()), self.max_line_width).ok()?;
        let markdown = postprocess(&markdown);
        if markdown.trim().is_empty() {
            return None;
        }
        Some(markdown)
    }
}

impl Default for ContentNormalizer {
    fn default() -> Self {
        Self::new(120)
    }
}

/// Strips boilerplate regions from HTML before conversion.
fn preprocess(html: &str) -> String {
    let mut cleaned = html.to_string();
    for pattern in boilerplate_patterns() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    cleaned
}

/// Cleans up converted markdown: trailing whitespace and blank-line runs.
fn postprocess(markdown: &str) -> String {
    let trimmed_lines: Vec<&str> = markdown.lines().map(str::trim_end).collect();
    let joined = trimmed_lines.join("\n");
    blank_run_pattern()
        .replace_all(&joined, "\n\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_doc(body: &str) -> RetrievedDocument {
        RetrievedDocument {
            body: body.to_string(),
            content_type: "text/html".to_string(),
            is_html: true,
        }
    }

    #[test]
    fn headings_use_atx_markers() {
        let normalizer = ContentNormalizer::default();
        let markdown = normalizer
            .extract_markdown("<h1>Main Title</h1><p>Some body text.</p>")
            .unwrap();
        assert!(markdown.contains("# Main Title"));
        assert!(markdown.contains("Some body text."));
    }

    #[test]
    fn scripts_and_styles_are_removed() {
        let normalizer = ContentNormalizer::default();
        let html = r#"<html><head><style>body { color: red; }</style></head>
            <body><script>alert("x");</script><p>Visible text</p></body></html>"#;
        let markdown = normalizer.extract_markdown(html).unwrap();
        assert!(markdown.contains("Visible text"));
        assert!(!markdown.contains("alert"));
        assert!(!markdown.contains("color: red"));
    }

    #[test]
    fn navigation_boilerplate_is_removed() {
        let normalizer = ContentNormalizer::default();
        let html = r#"<html><body>
            <nav><a href="/">Home</a><a href="/about">About</a></nav>
            <p>Article body</p>
            <footer>Copyright notice</footer>
            </body></html>"#;
        let markdown = normalizer.extract_markdown(html).unwrap();
        assert!(markdown.contains("Article body"));
        assert!(!markdown.contains("Copyright notice"));
        assert!(!markdown.contains("About"));
    }

    #[test]
    fn empty_html_yields_nothing() {
        let normalizer = ContentNormalizer::default();
        assert!(normalizer.extract_markdown("").is_none());
        assert!(normalizer.extract_markdown("   \n\t ").is_none());
    }

    #[test]
    fn normalize_degrades_to_sentinel_when_nothing_readable() {
        let normalizer = ContentNormalizer::default();
        let result = normalizer.normalize(&html_doc("<script>only code</script>"), false);
        assert_eq!(result.text, SIMPLIFY_FAILED);
        assert!(result.prefix_note.is_none());
    }

    #[test]
    fn normalize_simplifies_html_without_prefix_note() {
        let normalizer = ContentNormalizer::default();
        let result = normalizer.normalize(&html_doc("<h1>Title</h1><p>Body</p>"), false);
        assert!(result.text.contains("# Title"));
        assert!(result.prefix_note.is_none());
    }

    #[test]
    fn force_raw_passes_html_through_with_note() {
        let normalizer = ContentNormalizer::default();
        let doc = html_doc("<h1>Title</h1>");
        let result = normalizer.normalize(&doc, true);
        assert_eq!(result.text, "<h1>Title</h1>");
        let note = result.prefix_note.unwrap();
        assert!(note.contains("text/html"));
        assert!(note.contains("cannot be simplified to markdown"));
    }

    #[test]
    fn non_html_passes_through_with_note() {
        let normalizer = ContentNormalizer::default();
        let doc = RetrievedDocument {
            body: "%PDF-1.4 raw bytes".to_string(),
            content_type: "application/pdf".to_string(),
            is_html: false,
        };
        let result = normalizer.normalize(&doc, false);
        assert_eq!(result.text, "%PDF-1.4 raw bytes");
        assert!(result.prefix_note.unwrap().contains("application/pdf"));
    }

    #[test]
    fn blank_line_runs_are_collapsed() {
        let cleaned = postprocess("line one\n\n\n\n\nline two");
        assert_eq!(cleaned, "line one\n\nline two");
    }

    #[test]
    fn trailing_whitespace_is_trimmed_per_line() {
        let cleaned = postprocess("line one   \nline two\t\n");
        assert_eq!(cleaned, "line one\nline two");
    }
}
