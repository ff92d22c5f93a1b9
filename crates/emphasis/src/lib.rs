#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/emphasis/src/lib.rs
//!
//! # Overview
//!
//! `emphasis` renders text with semantic emphasis for terminal diagnostics.
//! Callers describe *what* a fragment means ([`Style::Dim`] for noise such as
//! type annotations, [`Style::Bold`] for function names, a [`Color`] for
//! severity) and the crate decides whether escape sequences are emitted.
//!
//! # Design
//!
//! - [`Emphasis`] is a small value holding the resolved colour decision. It is
//!   `Copy`, so report builders and loggers embed it instead of consulting
//!   process-wide state on every call.
//! - [`ColorMode::Auto`] enables colour only when stdout is a terminal and
//!   `NO_COLOR` is unset. [`ColorMode::Never`] always returns the input
//!   unchanged, which is what golden-output tests use.
//! - Styles are described with the [`colored`] crate and encoded here, so
//!   the decision never depends on `colored`'s process-wide override.
//!
//! # Examples
//!
//! ```
//! use emphasis::{Color, ColorMode, Emphasis, Style};
//!
//! let plain = Emphasis::new(ColorMode::Never);
//! assert_eq!(plain.paint("main", Style::Bold), "main");
//! assert_eq!(plain.paint("boom", Style::Fg(Color::Red)), "boom");
//! ```

mod color;
mod mode;
mod style;
mod width;

pub use color::{Color, ParseColorError};
pub use mode::ColorMode;
pub use style::Style;
pub use width::{DEFAULT_TERMINAL_WIDTH, terminal_width};

use colored::{ColoredString, Colorize, Styles};

/// Attributes encoded into escape sequences, in SGR order.
const ENCODED_STYLES: &[(Styles, &str)] = &[
    (Styles::Bold, "1"),
    (Styles::Dimmed, "2"),
    (Styles::Underline, "4"),
];

const RESET: &str = "\u{1b}[0m";

/// Applies [`Style`]s to text according to a resolved [`ColorMode`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Emphasis {
    enabled: bool,
}

impl Emphasis {
    /// Resolves `mode` once and returns the painter.
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            enabled: mode.enabled(),
        }
    }

    /// Painter that never emits escape sequences.
    #[must_use]
    pub const fn plain() -> Self {
        Self { enabled: false }
    }

    /// Reports whether escape sequences are emitted.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Renders `text` with `style`.
    #[must_use]
    pub fn paint(self, text: &str, style: Style) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_owned();
        }
        let painted = match style {
            Style::Dim => text.dimmed(),
            Style::Bold => text.bold(),
            Style::Underline => text.underline(),
            Style::Fg(color) => text.color(color.to_colored()),
            Style::BoldFg(color) => text.color(color.to_colored()).bold(),
        };
        encode(&painted)
    }
}

/// Writes `painted` as SGR escape sequences. Inner resets re-apply the
/// style so nested fragments do not end the outer one early.
fn encode(painted: &ColoredString) -> String {
    let mut codes: Vec<String> = ENCODED_STYLES
        .iter()
        .filter(|(style, _)| painted.style().contains(*style))
        .map(|(_, code)| (*code).to_owned())
        .collect();
    if let Some(color) = painted.fgcolor() {
        codes.push(color.to_fg_str().into_owned());
    }
    if codes.is_empty() {
        return painted.input.clone();
    }
    let prefix = format!("\u{1b}[{}m", codes.join(";"));
    let body = painted.input.replace(RESET, &format!("{RESET}{prefix}"));
    format!("{prefix}{body}{RESET}")
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

/// Renders `text` with `style` using [`ColorMode::Auto`].
#[must_use]
pub fn emphasize(text: &str, style: Style) -> String {
    Emphasis::default().paint(text, style)
}
