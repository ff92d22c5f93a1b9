//! crates/formatting/src/format.rs
//! Dispatch from a [`Value`] to its rendering.

use std::any::type_name;
use std::panic::{self, AssertUnwindSafe};

use emphasis::Style;

use crate::error::FormatError;
use crate::inspect::Inspect;
use crate::names::{bare_type_name, rewrite_objects};
use crate::options::{FormatOptions, Stringifier};
use crate::pretty::pretty;
use crate::value::{MAX_NESTING, SeqKind, Value};

/// Formats any [`Inspect`] value.
///
/// The static type of `value` supplies the annotation shown when
/// [`FormatOptions::types`] is set. Never panics: a panicking
/// [`Inspect`] implementation renders as `<Type object>`.
///
/// ```
/// use emphasis::Emphasis;
/// use formatting::{FormatOptions, pformat};
///
/// let options = FormatOptions::new().emphasis(Emphasis::plain());
/// assert_eq!(pformat("word", &options), "\"word\"");
/// assert_eq!(pformat(&vec![1, 2], &options), "[1, 2]");
/// assert_eq!(pformat(&7u8, &options.types(true)), "7 (u8)");
/// ```
pub fn pformat<T: Inspect + ?Sized>(value: &T, options: &FormatOptions) -> String {
    let name = type_name::<T>();
    let snapshot = panic::catch_unwind(AssertUnwindSafe(|| value.inspect())).unwrap_or_else(|_| {
        let err = FormatError::Panicked {
            type_name: name.to_owned(),
        };
        tracing::debug!(error = %err, "inspect fallback");
        Value::Opaque {
            type_name: name.to_owned(),
            repr: format!("<{} object>", bare_type_name(name)),
        }
    });
    format_value(&snapshot, Some(name), options)
}

/// Formats an already captured [`Value`].
///
/// `type_name` is used for the annotation when types are enabled; without it
/// the value's [`kind_name`](Value::kind_name) is used.
#[must_use]
pub fn format_value(value: &Value, type_name: Option<&str>, options: &FormatOptions) -> String {
    let rendered = match value {
        Value::Str(text) if is_prose(text) => {
            generic(value, type_name, &options.stringifier(Stringifier::Plain))
        }
        _ => dispatch(value, type_name, options),
    };
    rewrite_objects(&rendered)
}

/// Top-level strings with spaces or a trailing colon are prose, printed as is.
fn is_prose(text: &str) -> bool {
    text.contains(' ') || text.ends_with(':')
}

fn dispatch(value: &Value, type_name: Option<&str>, options: &FormatOptions) -> String {
    dispatch_nested(value, type_name, options, 0)
}

fn dispatch_nested(
    value: &Value,
    type_name: Option<&str>,
    options: &FormatOptions,
    nesting: usize,
) -> String {
    match value {
        Value::Seq(kind, _) if nesting >= MAX_NESTING => kind.elided().to_owned(),
        Value::Map(_) if nesting >= MAX_NESTING => "{...}".to_owned(),
        Value::Map(_) => pretty(value, options.max_depth()),
        Value::Type(name) => bare_type_name(name),
        Value::Seq(kind, items) if options.max_depth() > 0 => {
            let child = options.types(false).depth(options.max_depth() - 1);
            let parts: Vec<String> = items
                .iter()
                .map(|item| dispatch_nested(item, None, &child, nesting + 1))
                .collect();
            reassemble(*kind, &parts)
        }
        _ => generic(value, type_name, options),
    }
}

fn reassemble(kind: SeqKind, parts: &[String]) -> String {
    let mut out = String::new();
    out.push(kind.open());
    out.push_str(&parts.join(", "));
    if kind == SeqKind::Tuple && parts.len() == 1 {
        out.push(',');
    }
    out.push(kind.close());
    out
}

fn generic(value: &Value, type_name: Option<&str>, options: &FormatOptions) -> String {
    let text = stringify(value, options.leaf_stringifier());
    if !options.show_types() {
        return text;
    }
    let bare = type_name.map_or_else(|| value.kind_name(), bare_type_name);
    let annotation = options.painter().paint(&format!("({bare})"), Style::Dim);
    format!("{text} {annotation}")
}

/// Applies `stringifier` to `value`, falling back to [`Value::plain`] when a
/// custom stringifier panics.
pub(crate) fn stringify(value: &Value, stringifier: Stringifier) -> String {
    match stringifier {
        Stringifier::Repr => value.repr(),
        Stringifier::Plain => value.plain(),
        Stringifier::Custom(convert) => panic::catch_unwind(AssertUnwindSafe(|| convert(value)))
            .unwrap_or_else(|_| {
                tracing::debug!(kind = %value.kind_name(), "custom stringifier panicked");
                value.plain()
            }),
    }
}
