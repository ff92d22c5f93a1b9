//! crates/emphasis/src/style.rs

use crate::Color;

/// Semantic emphasis applied to a fragment of text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Style {
    /// De-emphasised text such as type annotations.
    Dim,
    /// Strong emphasis.
    Bold,
    /// Labels.
    Underline,
    /// Foreground colour.
    Fg(Color),
    /// Bold foreground colour.
    BoldFg(Color),
}

impl From<Color> for Style {
    fn from(color: Color) -> Self {
        Self::Fg(color)
    }
}
