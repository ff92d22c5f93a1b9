//! crates/report/src/frame.rs
//! Stack frames and the local variables captured alongside them.

use std::any::type_name;

use formatting::{Inspect, Value};

/// One frame of a call stack.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRecord {
    /// Position within the trace the frame came from, oldest call first.
    /// Filtering keeps the original value.
    pub index: usize,
    /// Source file, when it could be resolved.
    pub file: Option<String>,
    /// One-based line number, `-1` when unknown.
    pub line: i64,
    /// Function name without module path hashes.
    pub function: String,
    /// Trimmed text of the responsible source line.
    pub source_line: Option<String>,
    /// Locals captured at the frame, error-site frames only.
    pub locals: Option<Locals>,
}

impl FrameRecord {
    /// Creates a frame with no source line and no locals.
    #[must_use]
    pub fn new(
        index: usize,
        file: impl Into<String>,
        line: i64,
        function: impl Into<String>,
    ) -> Self {
        Self {
            index,
            file: Some(file.into()),
            line,
            function: function.into(),
            source_line: None,
            locals: None,
        }
    }

    /// Creates a frame whose source file could not be resolved.
    #[must_use]
    pub fn unresolved(index: usize, function: impl Into<String>) -> Self {
        Self {
            index,
            file: None,
            line: -1,
            function: function.into(),
            source_line: None,
            locals: None,
        }
    }

    /// Sets the responsible source line.
    #[must_use]
    pub fn with_source_line(mut self, line: impl Into<String>) -> Self {
        self.source_line = Some(line.into());
        self
    }

    /// Attaches locals.
    #[must_use]
    pub fn with_locals(mut self, locals: Locals) -> Self {
        self.locals = Some(locals);
        self
    }

    /// File name for display, `unknown` when unresolved.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.file.as_deref().unwrap_or("unknown")
    }
}

/// A named local variable snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Local {
    /// Variable name.
    pub name: String,
    /// Captured value.
    pub value: Value,
    /// Full static type name.
    pub type_name: String,
}

impl Local {
    /// Captures `value` under `name`.
    #[must_use]
    pub fn new<T: Inspect + ?Sized>(name: impl Into<String>, value: &T) -> Self {
        Self {
            name: name.into(),
            value: value.inspect(),
            type_name: type_name::<T>().to_owned(),
        }
    }

    /// Wraps an already captured [`Value`].
    #[must_use]
    pub fn from_value(name: impl Into<String>, value: Value, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            type_name: type_name.into(),
        }
    }
}

/// Ordered locals of one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Locals(Vec<Local>);

impl Locals {
    /// Empty set of locals.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a local.
    pub fn push(&mut self, local: Local) {
        self.0.push(local);
    }

    /// Appends a captured value under `name`.
    #[must_use]
    pub fn with<T: Inspect + ?Sized>(mut self, name: impl Into<String>, value: &T) -> Self {
        self.push(Local::new(name, value));
        self
    }

    /// Builder form of [`push`](Self::push) for an already captured value.
    #[must_use]
    pub fn with_value(
        mut self,
        name: impl Into<String>,
        value: Value,
        type_name: impl Into<String>,
    ) -> Self {
        self.push(Local::from_value(name, value, type_name));
        self
    }

    /// Looks a local up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Local> {
        self.0.iter().find(|local| local.name == name)
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Local> {
        self.0.iter()
    }

    /// Number of locals.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no locals were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First local holding an error value.
    #[must_use]
    pub fn first_error(&self) -> Option<&Local> {
        self.0
            .iter()
            .find(|local| matches!(local.value, Value::Error { .. }))
    }
}

impl From<Vec<Local>> for Locals {
    fn from(locals: Vec<Local>) -> Self {
        Self(locals)
    }
}

impl FromIterator<Local> for Locals {
    fn from_iter<I: IntoIterator<Item = Local>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Locals {
    type Item = &'a Local;
    type IntoIter = std::slice::Iter<'a, Local>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Captures the named variables into a [`Locals`].
///
/// ```
/// use report::locals;
///
/// let retries = 3;
/// let host = "db.internal";
/// let captured = locals!(retries, host);
/// assert_eq!(captured.len(), 2);
/// assert_eq!(captured.get("host").map(|l| l.type_name.as_str()), Some("&str"));
/// ```
#[macro_export]
macro_rules! locals {
    ($($name:ident),* $(,)?) => {
        $crate::Locals::from(vec![$($crate::Local::new(stringify!($name), &$name)),*])
    };
}
