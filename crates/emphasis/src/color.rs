//! crates/emphasis/src/color.rs

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Foreground colours used for severity and outcome highlighting.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Color {
    /// Errors.
    Red,
    /// Successful outcomes and call tracing.
    Green,
    /// Warnings.
    Yellow,
    /// Blue.
    Blue,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
    /// Regular informational text.
    White,
    /// De-emphasised notices.
    BrightBlack,
    /// Exceptions.
    BrightRed,
    /// Bright green.
    BrightGreen,
    /// Loud warnings.
    BrightYellow,
    /// Function names and titles.
    BrightWhite,
}

impl Color {
    /// Returns the lowercase colour name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::BrightBlack => "brightblack",
            Self::BrightRed => "brightred",
            Self::BrightGreen => "brightgreen",
            Self::BrightYellow => "brightyellow",
            Self::BrightWhite => "brightwhite",
        }
    }

    pub(crate) const fn to_colored(self) -> colored::Color {
        match self {
            Self::Red => colored::Color::Red,
            Self::Green => colored::Color::Green,
            Self::Yellow => colored::Color::Yellow,
            Self::Blue => colored::Color::Blue,
            Self::Magenta => colored::Color::Magenta,
            Self::Cyan => colored::Color::Cyan,
            Self::White => colored::Color::White,
            Self::BrightBlack => colored::Color::BrightBlack,
            Self::BrightRed => colored::Color::BrightRed,
            Self::BrightGreen => colored::Color::BrightGreen,
            Self::BrightYellow => colored::Color::BrightYellow,
            Self::BrightWhite => colored::Color::BrightWhite,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a colour name is not recognised.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("unknown colour name: \"{name}\"")]
pub struct ParseColorError {
    name: String,
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized: String = input
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            "yellow" => Ok(Self::Yellow),
            "blue" => Ok(Self::Blue),
            "magenta" => Ok(Self::Magenta),
            "cyan" => Ok(Self::Cyan),
            "white" => Ok(Self::White),
            "brightblack" | "dark" | "grey" | "gray" => Ok(Self::BrightBlack),
            "brightred" => Ok(Self::BrightRed),
            "brightgreen" => Ok(Self::BrightGreen),
            "brightyellow" => Ok(Self::BrightYellow),
            "brightwhite" => Ok(Self::BrightWhite),
            _ => Err(ParseColorError {
                name: input.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for color in [
            Color::Red,
            Color::Green,
            Color::Yellow,
            Color::BrightBlack,
            Color::BrightWhite,
        ] {
            assert_eq!(color.as_str().parse::<Color>(), Ok(color));
        }
    }

    #[test]
    fn parsing_ignores_case_and_separators() {
        assert_eq!("Bright_Red".parse::<Color>(), Ok(Color::BrightRed));
        assert_eq!("bright-yellow".parse::<Color>(), Ok(Color::BrightYellow));
        assert_eq!("dark".parse::<Color>(), Ok(Color::BrightBlack));
    }

    #[test]
    fn unknown_name_reports_input() {
        let err = "mauve".parse::<Color>().unwrap_err();
        assert!(err.to_string().contains("mauve"));
    }
}
