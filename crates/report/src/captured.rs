//! crates/report/src/captured.rs
//! Snapshot of the error a report describes.

use std::any::type_name;
use std::error::Error;
use std::sync::OnceLock;

use formatting::{EXC_ARG_CAP, bare_type_name, truncate};
use regex::Regex;

use crate::traced::{ErrorTrace, Traced};

/// Read-only snapshot of an error: kind, arguments, cause chain and,
/// optionally, the trace of the site that created it.
#[derive(Clone, Debug, PartialEq)]
pub struct CapturedError {
    kind: String,
    args: Vec<String>,
    message: String,
    causes: Vec<String>,
    trace: Option<ErrorTrace>,
}

impl CapturedError {
    /// Captures `err`.
    ///
    /// The kind is the bare name of `E`, or of the wrapped error for a
    /// [`Traced`]; for trait objects it is recovered from the error's `Debug`
    /// output. Use [`from_traced`](Self::from_traced) to keep the trace. The single argument is the error's
    /// message, omitted when empty.
    ///
    /// ```
    /// use report::CapturedError;
    ///
    /// let err = "x".parse::<u32>().unwrap_err();
    /// let captured = CapturedError::from_error(&err);
    /// assert_eq!(captured.kind(), "ParseIntError");
    /// assert_eq!(captured.args_summary(), "invalid digit found in string");
    /// ```
    #[must_use]
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        let message = err.to_string();
        Self {
            kind: error_kind::<E>(&format!("{err:?}")),
            args: if message.is_empty() {
                Vec::new()
            } else {
                vec![message.clone()]
            },
            message,
            causes: cause_chain(err),
            trace: None,
        }
    }

    /// Captures a [`Traced`] error, keeping its trace.
    #[must_use]
    pub fn from_traced<E: Error>(err: &Traced<E>) -> Self {
        let mut captured = Self::from_error(err.inner());
        captured.trace = Some(err.trace().clone());
        captured
    }

    /// Builds a snapshot from explicit parts.
    #[must_use]
    pub fn from_parts<I, S>(kind: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        Self {
            kind: kind.into(),
            message: args.join(", "),
            args,
            causes: Vec::new(),
            trace: None,
        }
    }

    /// Replaces the error-site trace.
    #[must_use]
    pub fn with_trace(mut self, trace: ErrorTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Appends a cause message.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    /// Bare type name of the error.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Stringified constructor arguments.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Display message of the error.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Messages of the `source()` chain, outermost first.
    #[must_use]
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Error-site trace, when one was captured.
    #[must_use]
    pub const fn trace(&self) -> Option<&ErrorTrace> {
        self.trace.as_ref()
    }

    /// Arguments capped at 500 characters each and joined with `", "`.
    #[must_use]
    pub fn args_summary(&self) -> String {
        self.args
            .iter()
            .map(|arg| truncate(arg, EXC_ARG_CAP))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<E: Error> From<&Traced<E>> for CapturedError {
    fn from(err: &Traced<E>) -> Self {
        Self::from_traced(err)
    }
}

fn error_kind<E: ?Sized>(debug: &str) -> String {
    static DEBUG_HEAD_RE: OnceLock<Regex> = OnceLock::new();

    let name = type_name::<E>();
    if let Some(inner) = name
        .strip_prefix(type_name::<Traced<()>>().trim_end_matches("<()>"))
        .and_then(|rest| rest.strip_prefix('<'))
        .and_then(|rest| rest.strip_suffix('>'))
    {
        return bare_type_name(inner);
    }
    if !name.starts_with("dyn ") {
        return bare_type_name(name);
    }
    let re = DEBUG_HEAD_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_:]*").expect("valid regex"));
    re.find(debug)
        .map_or_else(|| bare_type_name(name), |m| bare_type_name(m.as_str()))
}

fn cause_chain<E: Error + ?Sized>(err: &E) -> Vec<String> {
    let mut causes = Vec::new();
    let mut next = err.source();
    while let Some(cause) = next {
        causes.push(cause.to_string());
        next = cause.source();
    }
    causes
}
