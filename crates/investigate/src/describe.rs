//! crates/investigate/src/describe.rs
//! `expression (Type): value` lines for quick inspection.

use std::any::type_name;

use formatting::{FormatOptions, Inspect, bare_type_name, pformat};

/// Renders `expr (Type): value`.
///
/// ```
/// use emphasis::Emphasis;
/// use formatting::FormatOptions;
/// use investigate::describe;
///
/// let options = FormatOptions::new().emphasis(Emphasis::plain());
/// assert_eq!(describe("5 + 5", &(5 + 5), &options), "5 + 5 (i32): 10");
/// ```
#[must_use]
pub fn describe<T: Inspect + ?Sized>(expr: &str, value: &T, options: &FormatOptions) -> String {
    format!(
        "{expr} ({}): {}",
        bare_type_name(type_name::<T>()),
        pformat(value, &options.types(false))
    )
}

/// Prints each expression with its type and value, one per line.
///
/// ```
/// use investigate::vprint;
///
/// let retries = 3;
/// vprint!(retries, retries * 2);
/// ```
#[macro_export]
macro_rules! vprint {
    ($($value:expr),+ $(,)?) => {{
        let options = $crate::__private::FormatOptions::new();
        $(
            println!("{}", $crate::describe(stringify!($value), &$value, &options));
        )+
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use emphasis::Emphasis;

    fn plain() -> FormatOptions {
        FormatOptions::new().emphasis(Emphasis::plain())
    }

    #[test]
    fn names_type_and_value() {
        let words = vec!["a", "b"];
        assert_eq!(describe("words", &words, &plain()), "words (Vec<&str>): [\"a\", \"b\"]");
        assert_eq!(describe("name", "ada lovelace", &plain()), "name (str): ada lovelace");
    }

    #[test]
    fn type_flag_is_ignored() {
        assert_eq!(describe("n", &1_u8, &plain().types(true)), "n (u8): 1");
    }
}
