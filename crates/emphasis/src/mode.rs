//! crates/emphasis/src/mode.rs

use is_terminal::IsTerminal;

/// Decides whether escape sequences are emitted.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ColorMode {
    /// Colour when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

impl ColorMode {
    /// Resolves the mode against the current process.
    #[must_use]
    pub fn enabled(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ColorMode;

    #[test]
    fn explicit_modes_ignore_the_environment() {
        assert!(ColorMode::Always.enabled());
        assert!(!ColorMode::Never.enabled());
    }

    #[test]
    fn auto_is_the_default() {
        assert_eq!(ColorMode::default(), ColorMode::Auto);
    }
}
