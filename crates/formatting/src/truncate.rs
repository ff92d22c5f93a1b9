//! crates/formatting/src/truncate.rs
//! Character-based output caps.

/// Cap applied to logged return values.
pub const RETURN_VALUE_CAP: usize = 300;

/// Cap applied to each stringified error argument.
pub const EXC_ARG_CAP: usize = 500;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

/// Shortens `text` to `cap` characters followed by [`ELLIPSIS`].
///
/// Text of at most `cap` characters is returned unchanged; longer text comes
/// back exactly `cap + 3` characters long. Characters, not bytes, are counted.
///
/// ```
/// use formatting::truncate;
///
/// assert_eq!(truncate("abcdef", 3), "abc...");
/// assert_eq!(truncate("abc", 3), "abc");
/// ```
#[must_use]
pub fn truncate(text: &str, cap: usize) -> String {
    match text.char_indices().nth(cap) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
        None => text.to_owned(),
    }
}
