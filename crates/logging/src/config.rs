//! crates/logging/src/config.rs
//! Logger configuration resolved from the process environment.

use super::levels::{Level, parse_level_lenient};

/// Environment variable naming the minimum level, or `none` to disable output.
pub const LOG_LEVEL_ENV: &str = "DEBUGKIT_LOG_LEVEL";

/// Environment variable enabling verbose-only messages.
pub const VERBOSE_ENV: &str = "DEBUGKIT_VERBOSE";

/// Resolved logging configuration.
///
/// The surrounding process builds this once (usually with
/// [`from_env`](Self::from_env)) and passes it down; nothing below this type
/// reads the environment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogConfig {
    /// Minimum level that passes.
    pub level: Level,
    /// Whether messages marked verbose-only are shown.
    pub verbose: bool,
    /// Suppresses every message.
    pub disabled: bool,
}

impl LogConfig {
    /// Reads [`LOG_LEVEL_ENV`] and [`VERBOSE_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        let level = std::env::var(LOG_LEVEL_ENV).ok();
        let verbose = std::env::var(VERBOSE_ENV).ok();
        Self::from_vars(level.as_deref(), verbose.as_deref())
    }

    /// Builds a configuration from raw variable values.
    ///
    /// An unknown level name resolves to [`Level::NotSet`]. Any non-empty
    /// verbose value other than `0`, `false`, `no` or `off` enables verbose
    /// output.
    #[must_use]
    pub fn from_vars(level: Option<&str>, verbose: Option<&str>) -> Self {
        let level = level.map(str::trim).unwrap_or_default();
        let disabled = level.eq_ignore_ascii_case("none");
        let level = if disabled || level.is_empty() {
            Level::NotSet
        } else {
            parse_level_lenient(level)
        };
        Self {
            level,
            verbose: verbose.is_some_and(is_truthy),
            disabled,
        }
    }

    /// Replaces the minimum level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Replaces the verbose flag.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Reports whether a message at `level` passes.
    #[must_use]
    pub fn allows(&self, level: Level) -> bool {
        !self.disabled && level >= self.level
    }

    /// Reports whether a verbose-only message at `level` passes.
    #[must_use]
    pub fn allows_verbose(&self, level: Level) -> bool {
        self.verbose && self.allows(level)
    }
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty()
        && !["0", "false", "no", "off"]
            .iter()
            .any(|falsy| value.eq_ignore_ascii_case(falsy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_allow_everything() {
        let config = LogConfig::from_vars(None, None);
        assert_eq!(config, LogConfig::default());
        assert!(config.allows(Level::Trace));
        assert!(!config.verbose);
    }

    #[test]
    fn none_disables_output() {
        let config = LogConfig::from_vars(Some("None"), Some("1"));
        assert!(config.disabled);
        assert!(!config.allows(Level::Critical));
        assert!(!config.allows_verbose(Level::Critical));
    }

    #[test]
    fn level_name_sets_threshold() {
        let config = LogConfig::from_vars(Some(" info "), None);
        assert_eq!(config.level, Level::Info);
        assert!(!config.allows(Level::Debug));
        assert!(config.allows(Level::Notice));
    }

    #[test]
    fn verbose_flag_truthiness() {
        assert!(LogConfig::from_vars(None, Some("yes")).verbose);
        assert!(LogConfig::from_vars(None, Some("1")).verbose);
        assert!(!LogConfig::from_vars(None, Some("0")).verbose);
        assert!(!LogConfig::from_vars(None, Some("OFF")).verbose);
        assert!(!LogConfig::from_vars(None, Some("")).verbose);
    }

    #[test]
    fn builders_replace_fields() {
        let config = LogConfig::default()
            .with_level(Level::Error)
            .with_verbose(true);
        assert!(config.allows_verbose(Level::Error));
        assert!(!config.allows_verbose(Level::Warning));
    }
}
