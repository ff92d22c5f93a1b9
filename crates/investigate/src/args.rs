//! crates/investigate/src/args.rs
//! Turning the arguments of a log call into one message.

use std::any::type_name;

use emphasis::Style;
use formatting::{FormatOptions, Inspect, Value, format_value};

/// Combined raw length above which a multi-argument message is split into
/// one argument per line.
pub const WRAP_THRESHOLD: usize = 80;

/// One argument of a log call: a captured value and its static type.
#[derive(Clone, Debug, PartialEq)]
pub struct Arg {
    value: Value,
    type_name: String,
}

impl Arg {
    /// Captures `value`.
    #[must_use]
    pub fn new<T: Inspect + ?Sized>(value: &T) -> Self {
        Self {
            value: value.inspect(),
            type_name: type_name::<T>().to_owned(),
        }
    }

    /// A `name:` label introducing the next argument.
    #[must_use]
    pub fn label(name: &str) -> Self {
        Self {
            value: Value::str(format!("{name}:")),
            type_name: type_name::<str>().to_owned(),
        }
    }

    /// Wraps an already captured value.
    #[must_use]
    pub fn from_value(value: Value, type_name: impl Into<String>) -> Self {
        Self {
            value,
            type_name: type_name.into(),
        }
    }

    /// The captured value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Full type name of the argument.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Whether this argument is a string ending in `:`.
    #[must_use]
    pub fn is_label(&self) -> bool {
        matches!(&self.value, Value::Str(text) if text.ends_with(':'))
    }

    /// Length of the unformatted argument, used for the wrapping decision.
    fn raw_len(&self) -> usize {
        self.value.plain().chars().count()
    }
}

/// Builds an array of [`Arg`]s from expressions.
///
/// ```
/// use investigate::{args, fmt_args};
/// use formatting::FormatOptions;
/// use emphasis::Emphasis;
///
/// let retries = 3;
/// let options = FormatOptions::new().emphasis(Emphasis::plain());
/// assert_eq!(fmt_args(&args!["retries:", retries], &options), "retries: 3");
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        [$($crate::Arg::new(&$value)),*]
    };
}

/// Formats one argument, with its separator.
///
/// Labels are underlined and followed by `": "`; anything else is formatted
/// and followed by `", "`. Labels never carry a type annotation.
#[must_use]
pub fn fmt_arg(arg: &Arg, options: &FormatOptions) -> String {
    if !arg.is_label() {
        return format!("{}, ", format_value(&arg.value, Some(&arg.type_name), options));
    }
    let options = options.types(false);
    let text = format_value(&arg.value, Some(&arg.type_name), &options);
    let label = text.strip_suffix(':').unwrap_or(&text);
    format!("{}: ", options.painter().paint(label, Style::Underline))
}

/// Formats a whole argument list into one message.
///
/// Arguments are concatenated through [`fmt_arg`] and the trailing separator
/// is dropped. With more than one argument and a combined raw length above
/// [`WRAP_THRESHOLD`], each argument goes on its own line after a leading
/// newline.
#[must_use]
pub fn fmt_args(args: &[Arg], options: &FormatOptions) -> String {
    let formatted: Vec<String> = args.iter().map(|arg| fmt_arg(arg, options)).collect();
    let total: usize = args.iter().map(Arg::raw_len).sum();

    let joined = if args.len() > 1 && total > WRAP_THRESHOLD {
        let lines: Vec<&str> = formatted.iter().map(|part| part.trim_end()).collect();
        format!("\n{}", lines.join("\n"))
    } else {
        formatted.concat().trim().to_owned()
    };

    match joined.strip_suffix([',', ':']) {
        Some(stripped) => stripped.to_owned(),
        None => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emphasis::{ColorMode, Emphasis};

    fn plain() -> FormatOptions {
        FormatOptions::new().emphasis(Emphasis::plain())
    }

    #[test]
    fn words_and_prose() {
        assert_eq!(fmt_args(&args!["loading config"], &plain()), "loading config");
        assert_eq!(fmt_args(&args!["token"], &plain()), "\"token\"");
        assert_eq!(fmt_args(&args!["loaded", 3, "files"], &plain()), "\"loaded\", 3, \"files\"");
    }

    #[test]
    fn labels_introduce_values() {
        let path = "cfg.toml";
        assert_eq!(
            fmt_args(&[Arg::label("path"), Arg::new(path), Arg::label("size"), Arg::new(&12)], &plain()),
            "path: \"cfg.toml\", size: 12"
        );
    }

    #[test]
    fn trailing_label_loses_colon() {
        assert_eq!(fmt_args(&args!["done:"], &plain()), "done");
    }

    #[test]
    fn long_messages_wrap() {
        let long = "x".repeat(70);
        let rendered = fmt_args(&args![long.as_str(), 1234567890_u64, "tail"], &plain());
        assert_eq!(rendered, format!("\n\"{long}\",\n1234567890,\n\"tail\""));
    }

    #[test]
    fn single_long_argument_stays_inline() {
        let long = "y".repeat(120);
        assert_eq!(fmt_args(&args![long.as_str()], &plain()), format!("\"{long}\""));
    }

    #[test]
    fn labels_skip_type_annotations() {
        let options = plain().types(true);
        assert_eq!(fmt_args(&args!["n:", 5_u8], &options), "n: 5 (u8)");
    }

    #[test]
    fn labels_are_underlined_when_coloured() {
        let options = FormatOptions::new().emphasis(Emphasis::new(ColorMode::Always));
        let rendered = fmt_arg(&Arg::label("key"), &options);
        assert!(rendered.ends_with(": "));
        assert!(rendered.contains("\u{1b}[4m"));
    }

    #[test]
    fn values_rendering_with_a_colon_are_not_labels() {
        let arg = Arg::from_value(
            Value::Opaque {
                type_name: "app::Marker".to_owned(),
                repr: "Marker:".to_owned(),
            },
            "app::Marker",
        );
        assert!(!arg.is_label());
        assert_eq!(fmt_arg(&arg, &plain()), "Marker:, ");
        assert_eq!(fmt_args(&[arg, Arg::new(&1)], &plain()), "Marker:, 1");
    }

    #[test]
    fn empty_list_is_empty_message() {
        assert_eq!(fmt_args(&[], &plain()), "");
    }
}
