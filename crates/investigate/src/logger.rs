//! crates/investigate/src/logger.rs
//! Leveled logger that formats its arguments before emitting them.

use std::io;

use emphasis::{Color, Emphasis, Style};
use formatting::FormatOptions;
use logging::{Level, LogConfig, LogSink, WriterSink};
use report::ExcReport;

use crate::args::{Arg, fmt_args};

/// Presentation of a message: its level and its emphasis.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Tone {
    /// Dimmed debugging output.
    Debug,
    /// Plain information.
    Info,
    /// Successful outcomes.
    Good,
    /// Warnings.
    Warn,
    /// Warnings that should stand out.
    BoldWarn,
    /// Errors.
    Error,
    /// Section titles.
    Title,
    /// Errors followed by the summary of the error being handled.
    Exception,
}

impl Tone {
    /// Resolves a method name such as `"warn"` or `"TITLE"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let tone = match name.to_ascii_lowercase().as_str() {
            "debug" => Self::Debug,
            "info" => Self::Info,
            "good" => Self::Good,
            "warn" | "warning" => Self::Warn,
            "boldwarn" => Self::BoldWarn,
            "error" => Self::Error,
            "title" => Self::Title,
            "exception" => Self::Exception,
            _ => return None,
        };
        Some(tone)
    }

    /// Severity the message is emitted at.
    #[must_use]
    pub const fn level(self) -> Level {
        match self {
            Self::Debug => Level::Debug,
            Self::Info | Self::Good | Self::Title => Level::Info,
            Self::Warn | Self::BoldWarn => Level::Warning,
            Self::Error | Self::Exception => Level::Error,
        }
    }

    const fn style(self) -> Style {
        match self {
            Self::Debug => Style::Dim,
            Self::Info => Style::Fg(Color::White),
            Self::Good => Style::Fg(Color::Green),
            Self::Warn => Style::Fg(Color::Yellow),
            Self::BoldWarn => Style::BoldFg(Color::Yellow),
            Self::Error => Style::Fg(Color::Red),
            Self::Title => Style::BoldFg(Color::White),
            Self::Exception => Style::Fg(Color::BrightRed),
        }
    }
}

/// Per-call switches.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CallOptions {
    /// Emit only when verbose output is enabled.
    pub only_verbose: bool,
    /// Overrides the logger's type annotation setting.
    pub types: Option<bool>,
}

impl CallOptions {
    /// Options for a verbose-only call.
    #[must_use]
    pub const fn verbose() -> Self {
        Self {
            only_verbose: true,
            types: None,
        }
    }

    /// Options annotating every value with its type.
    #[must_use]
    pub const fn typed() -> Self {
        Self {
            only_verbose: false,
            types: Some(true),
        }
    }
}

/// Formats arguments with [`fmt_args`], paints them by [`Tone`] and emits
/// them to a [`LogSink`] when the [`LogConfig`] allows it.
///
/// A disabled configuration turns every method into a no-op.
///
/// ```
/// use emphasis::Emphasis;
/// use investigate::{Logger, args};
/// use logging::{LogConfig, WriterSink};
///
/// let mut logger = Logger::new(WriterSink::new(Vec::new()), LogConfig::default())
///     .emphasis(Emphasis::plain());
/// let port = 8080;
/// logger.info(&args!["listening on", port]);
/// let out = String::from_utf8(logger.into_sink().into_inner()).unwrap();
/// assert_eq!(out, "listening on, 8080\n");
/// ```
#[derive(Debug)]
pub struct Logger<S = WriterSink<io::Stdout>> {
    sink: S,
    config: LogConfig,
    only_verbose: bool,
    types: bool,
    emphasis: Emphasis,
    format: FormatOptions,
}

impl Logger {
    /// Logger writing to stdout, configured from the environment.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(WriterSink::stdout(), LogConfig::from_env())
    }
}

impl<S: LogSink> Logger<S> {
    /// Logger emitting to `sink` under `config`.
    #[must_use]
    pub fn new(sink: S, config: LogConfig) -> Self {
        Self {
            sink,
            config,
            only_verbose: false,
            types: false,
            emphasis: Emphasis::default(),
            format: FormatOptions::new(),
        }
    }

    /// Makes every call verbose-only.
    #[must_use]
    pub const fn only_verbose(mut self, only_verbose: bool) -> Self {
        self.only_verbose = only_verbose;
        self
    }

    /// Annotates values with their type by default.
    #[must_use]
    pub const fn types(mut self, types: bool) -> Self {
        self.types = types;
        self
    }

    /// Emphasis used for the message and inside formatted values.
    #[must_use]
    pub const fn emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Options used to format arguments; types and emphasis are taken from
    /// the logger.
    #[must_use]
    pub const fn format_options(mut self, options: FormatOptions) -> Self {
        self.format = options;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &LogConfig {
        &self.config
    }

    /// The underlying sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the logger, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Whether a call with `options` at `tone` would emit anything.
    #[must_use]
    pub fn would_emit(&self, tone: Tone, options: CallOptions) -> bool {
        if (options.only_verbose || self.only_verbose) && !self.config.verbose {
            return false;
        }
        self.config.allows(tone.level())
    }

    /// Formats and emits `args` at `tone`.
    pub fn log(&mut self, tone: Tone, args: &[Arg], options: CallOptions) {
        if !self.would_emit(tone, options) {
            return;
        }
        let format = self
            .format
            .types(options.types.unwrap_or(self.types))
            .emphasis(self.emphasis);
        let message = fmt_args(args, &format);
        let mut painted = if tone == Tone::Debug && message.contains("\u{1b}[") {
            message
        } else {
            self.emphasis.paint(&message, tone.style())
        };
        if tone == Tone::Exception {
            painted.push('\n');
            painted.push_str(&ExcReport::current().summary(&[]));
        }
        if let Err(err) = self.sink.emit(tone.level(), &painted) {
            tracing::debug!(error = %err, "log sink rejected message");
        }
    }

    /// Dimmed debugging output.
    pub fn debug(&mut self, args: &[Arg]) {
        self.log(Tone::Debug, args, CallOptions::default());
    }

    /// Information.
    pub fn info(&mut self, args: &[Arg]) {
        self.log(Tone::Info, args, CallOptions::default());
    }

    /// Information shown in green.
    pub fn good(&mut self, args: &[Arg]) {
        self.log(Tone::Good, args, CallOptions::default());
    }

    /// Warning.
    pub fn warn(&mut self, args: &[Arg]) {
        self.log(Tone::Warn, args, CallOptions::default());
    }

    /// Bold warning.
    pub fn boldwarn(&mut self, args: &[Arg]) {
        self.log(Tone::BoldWarn, args, CallOptions::default());
    }

    /// Error.
    pub fn error(&mut self, args: &[Arg]) {
        self.log(Tone::Error, args, CallOptions::default());
    }

    /// Bold title line.
    pub fn title(&mut self, args: &[Arg]) {
        self.log(Tone::Title, args, CallOptions::default());
    }

    /// Error message followed by the summary of the error currently handled
    /// on this thread.
    pub fn exception(&mut self, args: &[Arg]) {
        self.log(Tone::Exception, args, CallOptions::default());
    }

    /// Logs through the method called `name`; unknown names log as debug.
    pub fn by_level(&mut self, name: &str, args: &[Arg]) {
        let tone = Tone::from_name(name).unwrap_or(Tone::Debug);
        self.log(tone, args, CallOptions::default());
    }
}

/// Logs variables as `name: value` pairs.
///
/// `log_vars!(logger, a, b)` logs at debug; `log_vars!(logger => warn, a, b)`
/// picks the method.
///
/// ```
/// use emphasis::Emphasis;
/// use investigate::{Logger, log_vars};
/// use logging::{LogConfig, WriterSink};
///
/// let mut logger = Logger::new(WriterSink::new(Vec::new()), LogConfig::default())
///     .emphasis(Emphasis::plain());
/// let (user, attempts) = ("ada", 2);
/// log_vars!(logger => info, user, attempts);
/// let out = String::from_utf8(logger.into_sink().into_inner()).unwrap();
/// assert_eq!(out, "user: \"ada\", attempts: 2\n");
/// ```
#[macro_export]
macro_rules! log_vars {
    ($logger:expr => $method:ident, $($name:ident),+ $(,)?) => {
        $logger.$method(&[$($crate::Arg::label(stringify!($name)), $crate::Arg::new(&$name)),+])
    };
    ($logger:expr, $($name:ident),+ $(,)?) => {
        $crate::log_vars!($logger => debug, $($name),+)
    };
}
