//! crates/logging/src/levels.rs
//! Severity levels shared by loggers, sinks, and the tracing bridge.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Severity of a rendered message, ordered from least to most severe.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// No threshold; every message passes.
    #[default]
    NotSet,
    /// Fine-grained tracing.
    Trace,
    /// Debugging output.
    Debug,
    /// Informational output.
    Info,
    /// Noteworthy but normal events.
    Notice,
    /// Warnings.
    Warning,
    /// Errors.
    Error,
    /// Unrecoverable conditions.
    Critical,
}

impl Level {
    /// Every level in ascending severity.
    pub const ALL: [Self; 8] = [
        Self::NotSet,
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Returns the uppercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSet => "NOTSET",
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Notice => "NOTICE",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Numeric value of the level. `NotSet` is 0; the rest run from 9 to 15.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::NotSet => 0,
            Self::Trace => 9,
            Self::Debug => 10,
            Self::Info => 11,
            Self::Notice => 12,
            Self::Warning => 13,
            Self::Error => 14,
            Self::Critical => 15,
        }
    }

    /// Inverse of [`value`](Self::value).
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::NotSet),
            9 => Some(Self::Trace),
            10 => Some(Self::Debug),
            11 => Some(Self::Info),
            12 => Some(Self::Notice),
            13 => Some(Self::Warning),
            14 => Some(Self::Error),
            15 => Some(Self::Critical),
            _ => None,
        }
    }

    /// Maps the level onto the closest `tracing` level.
    #[must_use]
    pub const fn to_tracing(self) -> tracing::Level {
        match self {
            Self::NotSet | Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info | Self::Notice => tracing::Level::INFO,
            Self::Warning => tracing::Level::WARN,
            Self::Error | Self::Critical => tracing::Level::ERROR,
        }
    }

    /// Maps a `tracing` level onto a [`Level`].
    #[must_use]
    pub fn from_tracing(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Self::Trace,
            tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warning,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a level name or number is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown log level: \"{input}\"")]
pub struct ParseLevelError {
    input: String,
}

impl ParseLevelError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return Self::from_value(number).ok_or_else(|| ParseLevelError {
                input: input.to_owned(),
            });
        }
        match trimmed.to_ascii_uppercase().as_str() {
            "NOTSET" => Ok(Self::NotSet),
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "NOTICE" => Ok(Self::Notice),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(ParseLevelError {
                input: input.to_owned(),
            }),
        }
    }
}

/// Parses `input`, falling back to [`Level::NotSet`] for unknown names.
#[must_use]
pub fn parse_level_lenient(input: &str) -> Level {
    input.parse().unwrap_or_default()
}
