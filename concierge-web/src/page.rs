//! Character-window pagination with continuation hints.
//!
//! Windowing is a lossless, order-preserving partition of normalized content:
//! re-invoking with the returned continuation offset yields the next
//! contiguous slice. All offsets and lengths are character counts, so
//! multi-byte text paginates at the same offsets a caller counts.

use crate::types::PageWindow;

/// Sentinel returned when `start_index` is at or past the end of the content.
pub const NO_MORE_CONTENT: &str = "<e>No more content available.</e>";

/// Notice appended to a full window when content remains beyond it.
fn continuation_notice(next_start: usize) -> String {
    format!(
        "\n\n<e>Content truncated. Call the fetch tool with a start_index of {next_start} to get more.</e>"
    )
}

/// Slices `content` into the caller-requested window.
///
/// The boundary is exclusive on the high side: `start_index` equal to the
/// content length yields the no-more-content sentinel, not an empty window.
/// A continuation offset is emitted only when the window is exactly
/// `max_length` characters and characters remain past it.
pub fn window(content: &str, start_index: usize, max_length: usize) -> PageWindow {
    let total = content.chars().count();
    if start_index >= total {
        return PageWindow {
            text: NO_MORE_CONTENT.to_string(),
            continuation_offset: None,
        };
    }

    let slice: String = content.chars().skip(start_index).take(max_length).collect();
    let taken = slice.chars().count();
    if taken == 0 {
        return PageWindow {
            text: NO_MORE_CONTENT.to_string(),
            continuation_offset: None,
        };
    }

    let remaining = total - (start_index + taken);
    if taken == max_length && remaining > 0 {
        let next_start = start_index + taken;
        PageWindow {
            text: format!("{slice}{}", continuation_notice(next_start)),
            continuation_offset: Some(next_start),
        }
    } else {
        PageWindow {
            text: slice,
            continuation_offset: None,
        }
    }
}
