//! crates/formatting/src/options.rs
//! Knobs accepted by the formatter.

use emphasis::Emphasis;

use crate::value::Value;

/// Converts a leaf [`Value`] into text.
#[derive(Clone, Copy, Debug, Default)]
pub enum Stringifier {
    /// [`Value::repr`]: strings quoted and escaped.
    #[default]
    Repr,
    /// [`Value::plain`]: top-level strings printed verbatim.
    Plain,
    /// Caller-provided conversion. A panic inside it falls back to
    /// [`Stringifier::Plain`].
    Custom(fn(&Value) -> String),
}

/// Options for [`pformat`](crate::pformat) and
/// [`format_value`](crate::format_value).
///
/// ```
/// use formatting::{FormatOptions, Stringifier};
///
/// let options = FormatOptions::new()
///     .types(true)
///     .depth(2)
///     .stringifier(Stringifier::Plain);
/// assert!(options.show_types());
/// assert_eq!(options.max_depth(), 2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FormatOptions {
    types: bool,
    depth: usize,
    stringifier: Stringifier,
    emphasis: Emphasis,
}

impl FormatOptions {
    /// Defaults: no type annotations, depth 1, [`Stringifier::Repr`], colour
    /// decided by [`Emphasis::default`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: false,
            depth: 1,
            stringifier: Stringifier::Repr,
            emphasis: Emphasis::default(),
        }
    }

    /// Annotates rendered values with their bare type name.
    #[must_use]
    pub const fn types(mut self, types: bool) -> Self {
        self.types = types;
        self
    }

    /// How many container levels are expanded element by element.
    #[must_use]
    pub const fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Replaces the leaf stringifier.
    #[must_use]
    pub const fn stringifier(mut self, stringifier: Stringifier) -> Self {
        self.stringifier = stringifier;
        self
    }

    /// Replaces the painter used for type annotations.
    #[must_use]
    pub const fn emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Whether type annotations are enabled.
    #[must_use]
    pub const fn show_types(&self) -> bool {
        self.types
    }

    /// Configured recursion depth.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.depth
    }

    /// Configured stringifier.
    #[must_use]
    pub const fn leaf_stringifier(&self) -> Stringifier {
        self.stringifier
    }

    /// Configured painter.
    #[must_use]
    pub const fn painter(&self) -> Emphasis {
        self.emphasis
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::new()
    }
}
