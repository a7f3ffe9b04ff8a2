//! Line-item extraction from model replies.
//!
//! Models answer "give me N tasks" with a numbered or bulleted list. This
//! module turns that free-form text into an ordered list of clean items.

/// Characters stripped from both ends of every line (besides whitespace).
const MARKER_CHARS: &[char] = &['-', '•', '.', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Returns true if `c` is a list marker or whitespace.
fn is_marker(c: char) -> bool {
    c.is_whitespace() || MARKER_CHARS.contains(&c)
}

/// Clean a single line, removing bullet markers, numbering and padding.
///
/// Returns `None` when nothing is left.
pub fn clean_line(line: &str) -> Option<&str> {
    let cleaned = line.trim_matches(is_marker);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Extract the list items from a block of text, one per line.
///
/// Blank lines and lines made only of markers are dropped; the order of the
/// remaining lines is preserved.
pub fn extract_items(text: &str) -> Vec<String> {
    text.lines().filter_map(clean_line).map(str::to_string).collect()
}
