//! crates/investigate/src/calls.rs
//! Wrappers that log a call's arguments, result or failure around a closure.
//!
//! Messages go straight to a [`LogSink`], unfiltered: these wrappers are
//! switched on by editing the call site, not by configuration.

use std::any::Any;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

use emphasis::{Color, ColorMode, Emphasis, Style};
use formatting::{FormatOptions, Inspect, Value};
use logging::{Level, LogSink};
use report::{CapturedError, ReportBuilder, Traced};

use crate::args::Arg;
use crate::error::LookupError;
use crate::logger::Logger;
use crate::signature::{CallSig, pretty_retval, pretty_sig};

/// Name under which [`on_return`] exposes the return value.
pub const RETURN_VARIABLE: &str = "return";

/// What [`investigate`] logs.
#[derive(Clone, Copy, Debug)]
pub struct InvestigateOptions {
    args: bool,
    ret_val: bool,
    print_exc: bool,
    types: bool,
    format: FormatOptions,
}

impl InvestigateOptions {
    /// Logs arguments, return value and error reports, without types.
    #[must_use]
    pub fn new() -> Self {
        Self {
            args: true,
            ret_val: true,
            print_exc: true,
            types: false,
            format: FormatOptions::new(),
        }
    }

    /// Whether the entry line lists the arguments.
    #[must_use]
    pub const fn args(mut self, args: bool) -> Self {
        self.args = args;
        self
    }

    /// Whether the exit line shows the return value.
    #[must_use]
    pub const fn ret_val(mut self, ret_val: bool) -> Self {
        self.ret_val = ret_val;
        self
    }

    /// Whether a full report is logged when the call returns an error.
    #[must_use]
    pub const fn print_exc(mut self, print_exc: bool) -> Self {
        self.print_exc = print_exc;
        self
    }

    /// Whether values are annotated with their type.
    #[must_use]
    pub const fn types(mut self, types: bool) -> Self {
        self.types = types;
        self
    }

    /// Formatting of arguments and return values, including emphasis.
    #[must_use]
    pub const fn format_options(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }

    const fn painter(&self) -> Emphasis {
        self.format.painter()
    }

    fn value_options(&self) -> FormatOptions {
        self.format.types(self.types)
    }
}

impl Default for InvestigateOptions {
    fn default() -> Self {
        Self::new()
    }
}

fn emit<S: LogSink>(sink: &mut S, level: Level, message: &str) {
    if let Err(err) = sink.emit(level, message) {
        tracing::debug!(error = %err, "call log sink rejected message");
    }
}

/// Runs `f` and logs `name() returning → value`.
pub fn log_return<S, R, F>(sink: &mut S, sig: &CallSig, options: &InvestigateOptions, f: F) -> R
where
    S: LogSink,
    R: Inspect,
    F: FnOnce() -> R,
{
    let retval = f();
    let pretty = pretty_retval(&retval, &options.format.types(false));
    let line = format!("{}() returning → {pretty}", sig.name());
    emit(sink, Level::Info, &options.painter().paint(&line, Style::Fg(Color::Green)));
    retval
}

/// Runs `f` and logs `name(a=1, b="x") → value`, or `name(<no args>) → value`.
pub fn log_in_out<S, R, F>(sink: &mut S, sig: &CallSig, options: &InvestigateOptions, f: F) -> R
where
    S: LogSink,
    R: Inspect,
    F: FnOnce() -> R,
{
    let mut args = pretty_sig(sig, &options.format.types(false));
    if args.is_empty() {
        args.push_str("<no args>");
    }
    let retval = f();
    let pretty = pretty_retval(&retval, &options.value_options());
    let line = format!("{}({args}) → {pretty}", sig.name());
    emit(sink, Level::Info, &options.painter().paint(&line, Style::Fg(Color::Green)));
    retval
}

/// Runs `f`, logging entry, exit and failure.
///
/// Logs `entered module::name(args)` before the call and either
/// `module::name() returning → value` or `exiting module::name()` after it.
/// An `Err` is logged as a full report and returned unchanged. A panic is
/// logged and then resumed.
///
/// ```
/// use emphasis::Emphasis;
/// use formatting::FormatOptions;
/// use investigate::{InvestigateOptions, call_sig, investigate};
/// use logging::WriterSink;
///
/// fn half(n: u32) -> Result<u32, std::fmt::Error> {
///     Ok(n / 2)
/// }
///
/// let mut sink = WriterSink::new(Vec::new());
/// let options = InvestigateOptions::new()
///     .format_options(FormatOptions::new().emphasis(Emphasis::plain()));
/// let n = 10;
/// let value = investigate(&mut sink, &call_sig!(half(n)), &options, || half(n));
/// assert_eq!(value, Ok(5));
/// let out = String::from_utf8(sink.into_inner()).unwrap();
/// assert!(out.starts_with("entered "));
/// assert!(out.contains("half(n=10)\n"));
/// assert!(out.ends_with("half() returning → 5\n"));
/// ```
pub fn investigate<S, T, E, F>(
    sink: &mut S,
    sig: &CallSig,
    options: &InvestigateOptions,
    f: F,
) -> Result<T, E>
where
    S: LogSink,
    T: Inspect,
    E: Error,
    F: FnOnce() -> Result<T, E>,
{
    investigate_with(sink, sig, options, f, CapturedError::from_error)
}

/// [`investigate`] for calls failing with a [`Traced`] error; the report
/// includes the error-site trace and locals.
pub fn investigate_traced<S, T, E, F>(
    sink: &mut S,
    sig: &CallSig,
    options: &InvestigateOptions,
    f: F,
) -> Result<T, Traced<E>>
where
    S: LogSink,
    T: Inspect,
    E: Error,
    F: FnOnce() -> Result<T, Traced<E>>,
{
    investigate_with(sink, sig, options, f, CapturedError::from_traced)
}

fn investigate_with<S, T, E, F, C>(
    sink: &mut S,
    sig: &CallSig,
    options: &InvestigateOptions,
    f: F,
    capture: C,
) -> Result<T, E>
where
    S: LogSink,
    T: Inspect,
    F: FnOnce() -> Result<T, E>,
    C: FnOnce(&E) -> CapturedError,
{
    let painter = options.painter();
    let id = sig.qualified();

    let entered = if options.args {
        let args = pretty_sig(sig, &options.value_options());
        let args = if args.is_empty() { "no args".to_owned() } else { args };
        format!("entered {id}({args})")
    } else {
        format!("entered {id}()")
    };
    emit(sink, Level::Info, &painter.paint(&entered, Style::BoldFg(Color::Green)));

    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => {
            let line = if options.ret_val {
                let pretty = pretty_retval(&value, &options.value_options());
                painter.paint(&format!("{id}() returning → {pretty}"), Style::Fg(Color::Green))
            } else {
                painter.paint(&format!("exiting {id}()"), Style::BoldFg(Color::Green))
            };
            emit(sink, Level::Info, &line);
            Ok(value)
        }
        Ok(Err(err)) => {
            if options.print_exc {
                let mode = if painter.is_enabled() {
                    ColorMode::Always
                } else {
                    ColorMode::Never
                };
                let report = ReportBuilder::new().error(capture(&err)).color(mode).build();
                let text = report.full(&[], None);
                emit(sink, Level::Error, &painter.paint(&text, Style::Fg(Color::BrightRed)));
            }
            Err(err)
        }
        Err(payload) => {
            let line = format!("{id}() panicked: {}", panic_message(payload.as_ref()));
            emit(sink, Level::Error, &painter.paint(&line, Style::Fg(Color::BrightRed)));
            panic::resume_unwind(payload)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}

/// Runs `f`, then logs each of `variables` through `logger` at the method
/// named `level` (see [`Logger::by_level`]).
///
/// A variable is an argument name from `sig` or [`RETURN_VARIABLE`],
/// optionally followed by `.field` segments that index into mappings by key
/// and sequences by position. Unresolvable variables are logged as
/// warnings.
pub fn on_return<S, R, F>(
    logger: &mut Logger<S>,
    sig: &CallSig,
    variables: &[&str],
    level: &str,
    f: F,
) -> R
where
    S: LogSink,
    R: Inspect,
    F: FnOnce() -> R,
{
    let retval = f();
    let returned = Arg::new(&retval);
    for variable in variables {
        match resolve(sig, &returned, variable) {
            Ok(arg) => logger.by_level(level, &[Arg::label(variable), arg]),
            Err(err) => logger.warn(&[Arg::new(err.to_string().as_str())]),
        }
    }
    retval
}

/// Resolves a dotted variable path against a call's arguments and return
/// value.
///
/// # Errors
///
/// Returns [`LookupError::Unknown`] when the first segment matches nothing
/// and [`LookupError::MissingField`] when a later segment cannot be
/// followed.
pub fn resolve(sig: &CallSig, returned: &Arg, path: &str) -> Result<Arg, LookupError> {
    let mut segments = path.split('.');
    let root = segments.next().unwrap_or_default();
    let start = if root == RETURN_VARIABLE {
        returned
    } else {
        sig.get(root)
            .ok_or_else(|| LookupError::Unknown(root.to_owned()))?
    };

    let mut current = start.value();
    let mut walked = root.to_owned();
    let mut nested = false;
    for field in segments {
        current = child(current, field).ok_or_else(|| LookupError::MissingField {
            path: walked.clone(),
            field: field.to_owned(),
        })?;
        walked.push('.');
        walked.push_str(field);
        nested = true;
    }

    if nested {
        Ok(Arg::from_value(current.clone(), current.kind_name()))
    } else {
        Ok(start.clone())
    }
}

fn child<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    match value {
        Value::Map(entries) => entries
            .iter()
            .find_map(|(key, value)| (key.plain() == field).then_some(value)),
        Value::Seq(_, items) => field.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    }
}
