//! crates/formatting/src/value.rs
//! The inspectable snapshot every formatter entry point works on.

use std::any::type_name;
use std::error::Error;
use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::error::FormatError;
use crate::names::{bare_type_name, strip_generics};

/// Nesting beyond this many container levels renders as an elision marker.
pub(crate) const MAX_NESTING: usize = 64;

/// Shape of a [`Value::Seq`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SeqKind {
    /// Ordered, growable sequence: `[a, b]`.
    List,
    /// Fixed heterogeneous group: `(a, b)`, `(a,)`.
    Tuple,
    /// Unordered collection of distinct items: `{a, b}`.
    Set,
}

impl SeqKind {
    pub(crate) const fn open(self) -> char {
        match self {
            Self::List => '[',
            Self::Tuple => '(',
            Self::Set => '{',
        }
    }

    pub(crate) const fn close(self) -> char {
        match self {
            Self::List => ']',
            Self::Tuple => ')',
            Self::Set => '}',
        }
    }

    pub(crate) const fn elided(self) -> &'static str {
        match self {
            Self::List => "[...]",
            Self::Tuple => "(...)",
            Self::Set => "{...}",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Set => "set",
        }
    }
}

/// Owned snapshot of a runtime value.
///
/// Values are produced by [`Inspect`](crate::Inspect) implementations or the
/// constructors below. Being an owned tree, a `Value` cannot refer back to
/// itself.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absence of a value.
    None,
    /// Boolean.
    Bool(bool),
    /// Any integer that fits in `i128`.
    Int(i128),
    /// Floating point number.
    Float(f64),
    /// Text.
    Str(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// List, tuple or set.
    Seq(SeqKind, Vec<Value>),
    /// Key/value pairs in display order.
    Map(Vec<(Value, Value)>),
    /// A type, by full path.
    Type(String),
    /// A function or closure, by name.
    Function(String),
    /// A module or namespace, by path.
    Module(String),
    /// An object without a structured rendering, identified by address.
    Object {
        /// Type path, without generic arguments.
        path: String,
        /// Address of the object when it was inspected.
        address: usize,
    },
    /// An error value.
    Error {
        /// Bare type name of the error.
        kind: String,
        /// Rendered error message.
        message: String,
    },
    /// Anything else, with a prerendered representation.
    Opaque {
        /// Full type name.
        type_name: String,
        /// Representation to print.
        repr: String,
    },
}

impl Value {
    /// Text value.
    #[must_use]
    pub fn str(text: impl Into<String>) -> Self {
        Self::Str(text.into())
    }

    /// Byte string value.
    #[must_use]
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    /// List of values.
    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Seq(SeqKind::List, items.into_iter().collect())
    }

    /// Tuple of values.
    #[must_use]
    pub fn tuple(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Seq(SeqKind::Tuple, items.into_iter().collect())
    }

    /// Set of values, kept in the given order.
    #[must_use]
    pub fn set(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Seq(SeqKind::Set, items.into_iter().collect())
    }

    /// Mapping of values, kept in the given order.
    #[must_use]
    pub fn map(entries: impl IntoIterator<Item = (Self, Self)>) -> Self {
        Self::Map(entries.into_iter().collect())
    }

    /// The type `T`.
    #[must_use]
    pub fn type_of<T: ?Sized>() -> Self {
        Self::Type(type_name::<T>().to_owned())
    }

    /// A function value named `name`.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function(name.into())
    }

    /// A module value at `path`.
    #[must_use]
    pub fn module(path: impl Into<String>) -> Self {
        Self::Module(path.into())
    }

    /// An opaque object identified by its type and address.
    #[must_use]
    pub fn object<T: ?Sized>(value: &T) -> Self {
        Self::Object {
            path: strip_generics(type_name::<T>()).to_owned(),
            address: std::ptr::from_ref(value).cast::<()>().addr(),
        }
    }

    /// Captures `value` through its [`fmt::Debug`] output.
    #[must_use]
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Opaque {
            type_name: type_name::<T>().to_owned(),
            repr: format!("{value:?}"),
        }
    }

    /// Captures an error's kind and message.
    #[must_use]
    pub fn error<E: Error + ?Sized>(err: &E) -> Self {
        Self::Error {
            kind: bare_type_name(type_name::<E>()),
            message: err.to_string(),
        }
    }

    /// Builds a structured value from anything serde can serialise.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Serialize`] when the value refuses to
    /// serialise, for example a map with non-string keys.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, FormatError> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Like [`from_serialize`](Self::from_serialize), falling back to the
    /// [`fmt::Debug`] output when serialisation fails.
    #[must_use]
    pub fn serialized_or_debug<T: Serialize + fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::from_serialize(value).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "falling back to Debug rendering");
            Self::debug(value)
        })
    }

    /// Reports whether this value is a list, tuple, set or mapping.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Seq(..) | Self::Map(_))
    }

    /// Short name describing the value's kind, used for type annotations
    /// when no static type is known.
    #[must_use]
    pub fn kind_name(&self) -> String {
        match self {
            Self::None => "None".to_owned(),
            Self::Bool(_) => "bool".to_owned(),
            Self::Int(_) => "int".to_owned(),
            Self::Float(_) => "float".to_owned(),
            Self::Str(_) => "str".to_owned(),
            Self::Bytes(_) => "bytes".to_owned(),
            Self::Seq(kind, _) => kind.label().to_owned(),
            Self::Map(_) => "map".to_owned(),
            Self::Type(_) => "type".to_owned(),
            Self::Function(_) => "function".to_owned(),
            Self::Module(_) => "module".to_owned(),
            Self::Object { path, .. } => bare_type_name(path),
            Self::Error { kind, .. } => kind.clone(),
            Self::Opaque { type_name, .. } => bare_type_name(type_name),
        }
    }

    /// Unambiguous representation: strings quoted and escaped, containers
    /// bracketed, objects as `<path object at 0xADDR>` placeholders.
    #[must_use]
    pub fn repr(&self) -> String {
        let mut out = String::new();
        write_repr(self, &mut out, 0);
        out
    }

    /// Human representation: like [`repr`](Self::repr) except that a
    /// top-level string is printed without quotes.
    #[must_use]
    pub fn plain(&self) -> String {
        match self {
            Self::Str(text) => text.clone(),
            other => other.repr(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Int),
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::Seq(SeqKind::List, items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Self::Str(k), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

pub(crate) fn write_repr(value: &Value, out: &mut String, nesting: usize) {
    match value {
        Value::None => out.push_str("None"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Float(x) => {
            let _ = write!(out, "{x:?}");
        }
        Value::Str(text) => {
            let _ = write!(out, "{text:?}");
        }
        Value::Bytes(bytes) => {
            let _ = write!(out, "b\"{}\"", bytes.escape_ascii());
        }
        Value::Seq(kind, items) => {
            if nesting >= MAX_NESTING {
                out.push_str(kind.elided());
                return;
            }
            out.push(kind.open());
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(item, out, nesting + 1);
            }
            if *kind == SeqKind::Tuple && items.len() == 1 {
                out.push(',');
            }
            out.push(kind.close());
        }
        Value::Map(entries) => {
            if nesting >= MAX_NESTING {
                out.push_str("{...}");
                return;
            }
            out.push('{');
            for (i, (key, val)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(key, out, nesting + 1);
                out.push_str(": ");
                write_repr(val, out, nesting + 1);
            }
            out.push('}');
        }
        Value::Type(name) => {
            let _ = write!(out, "<type '{name}'>");
        }
        Value::Function(name) => {
            let _ = write!(out, "<function {name}>");
        }
        Value::Module(path) => {
            let _ = write!(out, "<module '{path}'>");
        }
        Value::Object { path, address } => {
            let _ = write!(out, "<{path} object at 0x{address:012x}>");
        }
        Value::Error { kind, message } => {
            let _ = write!(out, "{kind}({message:?})");
        }
        Value::Opaque { repr, .. } => out.push_str(repr),
    }
}
