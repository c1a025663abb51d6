//! Bounded text helpers for captured check output.
//!
//! Check collaborators may write arbitrary amounts of text; everything shown
//! in a report goes through these helpers so terminal output stays readable.

/// Collapse all whitespace runs to single spaces and bound the length.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, max_chars)
}

/// Bound length while preserving line structure. Used for stored excerpts.
pub fn excerpt(input: &str, max_chars: usize) -> String {
    truncate_chars(input.trim_end(), max_chars)
}

fn truncate_chars(input: &str, max_chars: usize) -> String {
    let mut chars = input.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
