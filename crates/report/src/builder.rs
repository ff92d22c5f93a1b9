//! crates/report/src/builder.rs
//! Assembly of an [`ExcReport`] from an error and the ambient stack.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use emphasis::{ColorMode, Emphasis, terminal_width};
use formatting::{EXC_ARG_CAP, FormatOptions, Value, truncate};

use crate::captured::CapturedError;
use crate::error::ReportError;
use crate::filter::FrameFilter;
use crate::frame::FrameRecord;
use crate::handler;
use crate::probe::{BacktraceProbe, StackProbe};
use crate::reconcile::{attach_locals, reconcile};
use crate::render::{ExcReport, ReportBody};
use crate::source::source_line;

/// Best-effort identification of the error a failed report was about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OriginalGuess {
    /// Bare type name of the error.
    pub kind: String,
    /// Its message.
    pub message: String,
    /// `true` when guessed from captured locals rather than known.
    pub heuristic: bool,
}

/// Configures and builds an [`ExcReport`].
///
/// Without an explicit [`error`](Self::error), the innermost error
/// registered through [`enter`](crate::enter) on the calling thread is used.
/// Without an explicit [`ambient_stack`](Self::ambient_stack), the stack is
/// captured through the [`probe`](Self::probe), a [`BacktraceProbe`] by
/// default.
///
/// ```
/// use emphasis::ColorMode;
/// use report::{CapturedError, FrameRecord, ReportBuilder};
///
/// let report = ReportBuilder::new()
///     .error(CapturedError::from_parts("Timeout", ["after 30s"]))
///     .ambient_stack(vec![FrameRecord::new(0, "src/main.rs", 12, "main")])
///     .color(ColorMode::Never)
///     .build();
/// assert_eq!(report.one_liner(&[]), "Timeout: after 30s");
/// assert_eq!(
///     report.short(&[]),
///     "Timeout: after 30s | File \"src/main.rs\", line 12 in main()"
/// );
/// ```
pub struct ReportBuilder {
    error: Option<CapturedError>,
    ambient_stack: Option<Vec<FrameRecord>>,
    probe: Option<Box<dyn StackProbe>>,
    capture_locals: bool,
    default_patterns: bool,
    extra_patterns: Vec<String>,
    terminal_width: Option<usize>,
    color: ColorMode,
    format: Option<FormatOptions>,
}

impl ReportBuilder {
    /// Builder with local capture on, the default frame filter, automatic
    /// colour and the detected terminal width.
    #[must_use]
    pub fn new() -> Self {
        Self {
            error: None,
            ambient_stack: None,
            probe: None,
            capture_locals: true,
            default_patterns: true,
            extra_patterns: Vec::new(),
            terminal_width: None,
            color: ColorMode::Auto,
            format: None,
        }
    }

    /// Reports on `error` instead of the thread's active one.
    #[must_use]
    pub fn error(mut self, error: CapturedError) -> Self {
        self.error = Some(error);
        self
    }

    /// Uses a pre-captured ambient stack, oldest call first.
    #[must_use]
    pub fn ambient_stack(mut self, frames: Vec<FrameRecord>) -> Self {
        self.ambient_stack = Some(frames);
        self
    }

    /// Captures the ambient stack through `probe`.
    #[must_use]
    pub fn probe(mut self, probe: impl StackProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// Whether error-site locals are attached to frames.
    #[must_use]
    pub const fn capture_locals(mut self, capture: bool) -> Self {
        self.capture_locals = capture;
        self
    }

    /// Adds a glob pattern of files whose frames are hidden.
    #[must_use]
    pub fn irrelevant_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_patterns.push(pattern.into());
        self
    }

    /// Drops the built-in toolchain and registry patterns.
    #[must_use]
    pub const fn without_default_patterns(mut self) -> Self {
        self.default_patterns = false;
        self
    }

    /// Overrides the separator width used by [`ExcReport::full`].
    #[must_use]
    pub const fn terminal_width(mut self, width: usize) -> Self {
        self.terminal_width = Some(width);
        self
    }

    /// Colour decision for the rendered text.
    #[must_use]
    pub const fn color(mut self, mode: ColorMode) -> Self {
        self.color = mode;
        self
    }

    /// Options used to render locals. Their painter is replaced by the
    /// report's.
    #[must_use]
    pub const fn format_options(mut self, options: FormatOptions) -> Self {
        self.format = Some(options);
        self
    }

    /// Builds the report. Never panics and never fails: any problem while
    /// assembling it produces a degraded report describing that problem.
    #[must_use]
    pub fn build(self) -> ExcReport {
        let emphasis = Emphasis::new(self.color);
        let width = self.terminal_width.unwrap_or_else(terminal_width);
        let format = self
            .format
            .unwrap_or_default()
            .emphasis(emphasis);
        let body = self.assemble_or_recover();
        ExcReport::new(body, emphasis, width, format)
    }

    fn assemble_or_recover(&self) -> Option<ReportBody> {
        let error = match self.error.clone().map_or_else(handler::try_current, |e| Ok(Some(e))) {
            Ok(Some(error)) => error,
            Ok(None) => return None,
            Err(failure) => return Some(self.recover(failure, None)),
        };
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.assemble(&error)));
        Some(match outcome {
            Ok(Ok(body)) => body,
            Ok(Err(failure)) => self.recover(failure, Some(&error)),
            Err(payload) => self.recover(ReportError::from_panic(payload.as_ref()), Some(&error)),
        })
    }

    fn filter(&self) -> Result<FrameFilter, ReportError> {
        if self.default_patterns {
            FrameFilter::with_extra(self.extra_patterns.iter().cloned())
        } else {
            FrameFilter::new(self.extra_patterns.iter().cloned())
        }
    }

    fn capture_ambient(&self) -> Result<Vec<FrameRecord>, ReportError> {
        match (&self.ambient_stack, &self.probe) {
            (Some(frames), _) => Ok(frames.clone()),
            (None, Some(probe)) => probe.capture(),
            (None, None) => BacktraceProbe::new().capture(),
        }
    }

    fn assemble(&self, error: &CapturedError) -> Result<ReportBody, ReportError> {
        let filter = self.filter()?;

        let error_frames = match error.trace() {
            Some(trace) => {
                let mut frames = filter.retain(trace.frames.clone());
                if self.capture_locals {
                    attach_locals(&mut frames, &trace.chain)?;
                } else {
                    for frame in &mut frames {
                        frame.locals = None;
                    }
                }
                frames
            }
            None => Vec::new(),
        };

        let mut ambient = filter.retain(self.capture_ambient()?);
        for frame in &mut ambient {
            frame.locals = None;
        }

        let mut stack = reconcile(ambient, error_frames);
        fill_source_lines(&mut stack);

        Ok(ReportBody {
            kind: error.kind().to_owned(),
            args_summary: error.args_summary(),
            causes: error.causes().to_vec(),
            stack,
            original: None,
            failure: None,
        })
    }

    /// Builds the degraded report after `failure`.
    fn recover(&self, failure: ReportError, error: Option<&CapturedError>) -> ReportBody {
        tracing::warn!(error = %failure, "report construction failed; using fallback");

        let ambient = panic::catch_unwind(AssertUnwindSafe(|| match self.capture_ambient() {
            Ok(frames) => frames,
            Err(err) => {
                tracing::debug!(error = %err, "ambient stack unavailable in fallback");
                Vec::new()
            }
        }))
        .unwrap_or_default();
        let mut stack = FrameFilter::with_defaults().retain(ambient);

        let original = error.map_or_else(
            || guess_original(&stack),
            |error| {
                Some(OriginalGuess {
                    kind: error.kind().to_owned(),
                    message: error.message().to_owned(),
                    heuristic: false,
                })
            },
        );

        let mut args = format!(
            "ExcReport construction ITSELF failed, accidental error (caught and ok):\n\t{}: {}",
            failure.kind(),
            truncate(&failure.to_string(), EXC_ARG_CAP)
        );
        if let Some(original) = &original {
            args.push_str(&format!(
                "\n\tORIGINAL error: {}: {}",
                original.kind, original.message
            ));
        }

        let _ = panic::catch_unwind(AssertUnwindSafe(|| fill_source_lines(&mut stack)));

        ReportBody {
            kind: original
                .as_ref()
                .map_or_else(|| "unknown".to_owned(), |o| o.kind.clone()),
            args_summary: args,
            causes: Vec::new(),
            stack,
            original,
            failure: Some(failure),
        }
    }
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReportBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportBuilder")
            .field("error", &self.error)
            .field("ambient_stack", &self.ambient_stack)
            .field("probe", &self.probe.as_ref().map(|_| "<probe>"))
            .field("capture_locals", &self.capture_locals)
            .field("default_patterns", &self.default_patterns)
            .field("extra_patterns", &self.extra_patterns)
            .field("terminal_width", &self.terminal_width)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// First error-typed local of the outermost frame that has locals.
fn guess_original(stack: &[FrameRecord]) -> Option<OriginalGuess> {
    let locals = stack.iter().find_map(|frame| frame.locals.as_ref())?;
    match &locals.first_error()?.value {
        Value::Error { kind, message } => Some(OriginalGuess {
            kind: kind.clone(),
            message: message.clone(),
            heuristic: true,
        }),
        _ => None,
    }
}

fn fill_source_lines(stack: &mut [FrameRecord]) {
    for frame in stack.iter_mut().filter(|f| f.source_line.is_none()) {
        if let Some(file) = frame.file.as_deref() {
            frame.source_line = source_line(file, frame.line);
        }
    }
}
