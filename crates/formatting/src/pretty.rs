//! crates/formatting/src/pretty.rs
//! Width-aware pretty printer for mappings.
//!
//! A container whose flat rendering fits in [`WIDTH`] columns (counting the
//! current indentation) stays on one line. Otherwise its entries go one per
//! line, aligned one column after the opening bracket, and each entry value
//! is laid out recursively against the remaining width. Containers nested
//! deeper than the requested depth collapse to `{...}`, `[...]` or `(...)`.

use crate::value::{MAX_NESTING, SeqKind, Value};

/// Target line width.
pub(crate) const WIDTH: usize = 80;

/// Renders `value` with nested containers beyond `depth` levels elided.
///
/// A `depth` of zero behaves like one: the outermost container is always
/// shown.
pub(crate) fn pretty(value: &Value, depth: usize) -> String {
    let depth = depth.clamp(1, MAX_NESTING);
    let mut out = String::new();
    write_pretty(value, &mut out, 0, 1, depth);
    out
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Seq(_, items) => items.is_empty(),
        Value::Map(entries) => entries.is_empty(),
        _ => false,
    }
}

fn flat(value: &Value, level: usize, depth: usize) -> String {
    if is_empty_container(value) || !value.is_container() {
        return value.repr();
    }
    match value {
        Value::Seq(kind, _) if level > depth => kind.elided().to_owned(),
        Value::Map(_) if level > depth => "{...}".to_owned(),
        Value::Seq(kind, items) => {
            let parts: Vec<String> = items.iter().map(|item| flat(item, level + 1, depth)).collect();
            assemble(*kind, &parts, ", ")
        }
        Value::Map(entries) => {
            let parts: Vec<String> = entries
                .iter()
                .map(|(key, val)| {
                    format!("{}: {}", flat(key, level + 1, depth), flat(val, level + 1, depth))
                })
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        other => other.repr(),
    }
}

fn assemble(kind: SeqKind, parts: &[String], separator: &str) -> String {
    let trailing = if kind == SeqKind::Tuple && parts.len() == 1 {
        ","
    } else {
        ""
    };
    format!(
        "{}{}{}{}",
        kind.open(),
        parts.join(separator),
        trailing,
        kind.close()
    )
}

fn write_pretty(value: &Value, out: &mut String, indent: usize, level: usize, depth: usize) {
    let rendered = flat(value, level, depth);
    if indent + rendered.chars().count() <= WIDTH || level > depth || is_empty_container(value) {
        out.push_str(&rendered);
        return;
    }
    let separator = format!(",\n{}", " ".repeat(indent + 1));
    match value {
        Value::Map(entries) => {
            out.push('{');
            for (i, (key, val)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(&separator);
                }
                let key = flat(key, level + 1, depth);
                out.push_str(&key);
                out.push_str(": ");
                write_pretty(val, out, indent + 1 + key.chars().count() + 2, level + 1, depth);
            }
            out.push('}');
        }
        Value::Seq(kind, items) => {
            out.push(kind.open());
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(&separator);
                }
                write_pretty(item, out, indent + 1, level + 1, depth);
            }
            if *kind == SeqKind::Tuple && items.len() == 1 {
                out.push(',');
            }
            out.push(kind.close());
        }
        _ => out.push_str(&rendered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: Value) -> (Value, Value) {
        (Value::str(key), value)
    }

    #[test]
    fn short_mapping_stays_on_one_line() {
        let map = Value::map([entry("a", Value::Int(1)), entry("b", Value::None)]);
        assert_eq!(pretty(&map, 1), "{\"a\": 1, \"b\": None}");
    }

    #[test]
    fn nested_containers_beyond_depth_are_elided() {
        let inner = Value::map([entry("x", Value::Int(1))]);
        let map = Value::map([
            entry("inner", inner),
            entry("items", Value::list([Value::Int(2)])),
            entry("empty", Value::list([])),
        ]);
        assert_eq!(
            pretty(&map, 1),
            "{\"inner\": {...}, \"items\": [...], \"empty\": []}"
        );
        assert_eq!(
            pretty(&map, 2),
            "{\"inner\": {\"x\": 1}, \"items\": [2], \"empty\": []}"
        );
    }

    #[test]
    fn zero_depth_still_shows_outer_mapping() {
        let map = Value::map([entry("k", Value::list([Value::Int(1)]))]);
        assert_eq!(pretty(&map, 0), pretty(&map, 1));
    }

    #[test]
    fn wide_mapping_breaks_one_entry_per_line() {
        let long = "x".repeat(50);
        let map = Value::map([
            entry("first", Value::str(long.clone())),
            entry("second", Value::str(long.clone())),
        ]);
        let rendered = pretty(&map, 1);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("{{\"first\": \"{long}\","));
        assert_eq!(lines[1], format!(" \"second\": \"{long}\"}}"));
    }

    #[test]
    fn wide_nested_list_is_indented_under_its_key() {
        let items: Vec<Value> = (0..30).map(|n| Value::Int(1000 + n)).collect();
        let map = Value::map([entry("ids", Value::list(items))]);
        let rendered = pretty(&map, 2);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("{\"ids\": [1000,"));
        assert_eq!(lines.next(), Some("         1001,"));
        assert!(rendered.ends_with("1029]}"));
    }
}
