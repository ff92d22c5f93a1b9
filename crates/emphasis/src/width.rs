//! crates/emphasis/src/width.rs

/// Width used when the terminal size cannot be determined.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Returns the column count of the controlling terminal.
///
/// Falls back to [`DEFAULT_TERMINAL_WIDTH`] when output is redirected or the
/// platform query fails.
#[must_use]
pub fn terminal_width() -> usize {
    match crossterm::terminal::size() {
        Ok((columns, _)) if columns > 0 => usize::from(columns),
        _ => DEFAULT_TERMINAL_WIDTH,
    }
}
