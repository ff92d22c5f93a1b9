//! crates/formatting/src/names.rs
//! Type-name shortening and object placeholder rewriting.

use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Strips module paths from a type name, keeping generic structure.
///
/// Accepts either a raw path (`alloc::vec::Vec<alloc::string::String>`) or a
/// wrapped form (`<type 'alloc::string::String'>`), and returns the bare name
/// (`Vec<String>`, `String`). Dotted paths are shortened the same way.
///
/// ```
/// use formatting::bare_type_name;
///
/// assert_eq!(bare_type_name("<type 'alloc::string::String'>"), "String");
/// assert_eq!(
///     bare_type_name("std::collections::HashMap<alloc::string::String, i32>"),
///     "HashMap<String, i32>"
/// );
/// ```
#[must_use]
pub fn bare_type_name(name: &str) -> String {
    static TYPE_WRAPPER_RE: OnceLock<Regex> = OnceLock::new();
    static PATH_PREFIX_RE: OnceLock<Regex> = OnceLock::new();

    let wrapper = TYPE_WRAPPER_RE
        .get_or_init(|| Regex::new(r#"^<\w+ ['"]([^'"]+)['"]>$"#).expect("valid regex"));
    let prefix = PATH_PREFIX_RE.get_or_init(|| {
        Regex::new(r"(?:[A-Za-z_][A-Za-z0-9_]*(?:::|\.))+").expect("valid regex")
    });

    let name = name.trim();
    let inner = wrapper
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map_or(name, |m| m.as_str());
    prefix.replace_all(inner, "").into_owned()
}

/// Rewrites `<path::Name object at 0xADDR>` placeholders into `Name (0xADDR)`.
///
/// Both `::` and `.` separated paths are recognised. Text without
/// placeholders is returned unchanged.
#[must_use]
pub fn rewrite_objects(text: &str) -> String {
    static OBJECT_RE: OnceLock<Regex> = OnceLock::new();
    let re = OBJECT_RE.get_or_init(|| {
        Regex::new(r"<(?:\w+(?:\.|::))*(\w+) object at (0x[0-9a-fA-F]{6,16})>")
            .expect("valid regex")
    });
    re.replace_all(text, |caps: &Captures<'_>| {
        format!("{} ({})", &caps[1], &caps[2])
    })
    .into_owned()
}

/// Drops generic arguments from a type path: `a::B<c::D>` becomes `a::B`.
pub(crate) fn strip_generics(name: &str) -> &str {
    name.split('<').next().unwrap_or(name).trim_end()
}
