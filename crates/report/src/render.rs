//! crates/report/src/render.rs
//! The four textual renderings of a report.
//!
//! The layouts are a stable contract: tooling and tests compare them
//! verbatim once colour is disabled.

use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Display, Write as _};

use emphasis::{Color, Emphasis, Style};
use formatting::{FormatOptions, Value, bare_type_name, format_value};

use crate::builder::{OriginalGuess, ReportBuilder};
use crate::captured::CapturedError;
use crate::error::ReportError;
use crate::frame::{FrameRecord, Locals};

/// Line returned by every renderer when there is no error to describe.
pub const NO_ACTIVE_ERROR_WARNING: &str = "ExcReport found no active error: build it inside an error handling scope (report::enter) or pass the error explicitly";

/// Rendered values starting with these are framework internals and omitted
/// from locals listings.
const NAMESPACE_MARKERS: &[&str] = &["typing", "core::", "std::"];

#[derive(Debug)]
pub(crate) struct ReportBody {
    pub(crate) kind: String,
    pub(crate) args_summary: String,
    pub(crate) causes: Vec<String>,
    pub(crate) stack: Vec<FrameRecord>,
    pub(crate) original: Option<OriginalGuess>,
    pub(crate) failure: Option<ReportError>,
}

/// A diagnostic report for one error.
///
/// Built by [`ReportBuilder`]. When no error was available the report is
/// inactive and every renderer returns [`NO_ACTIVE_ERROR_WARNING`].
#[derive(Debug)]
pub struct ExcReport {
    body: Option<ReportBody>,
    emphasis: Emphasis,
    width: usize,
    format: FormatOptions,
}

impl ExcReport {
    pub(crate) const fn new(
        body: Option<ReportBody>,
        emphasis: Emphasis,
        width: usize,
        format: FormatOptions,
    ) -> Self {
        Self {
            body,
            emphasis,
            width,
            format,
        }
    }

    /// Report on `err` with default settings.
    #[must_use]
    pub fn from_error<E: Error + ?Sized>(err: &E) -> Self {
        ReportBuilder::new()
            .error(CapturedError::from_error(err))
            .build()
    }

    /// Report on the innermost error being handled on this thread.
    #[must_use]
    pub fn current() -> Self {
        ReportBuilder::new().build()
    }

    /// Whether the report describes an error.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.body.is_some()
    }

    /// Bare type name of the error.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.body.as_ref().map(|b| b.kind.as_str())
    }

    /// Capped, joined error arguments.
    #[must_use]
    pub fn args_summary(&self) -> Option<&str> {
        self.body.as_ref().map(|b| b.args_summary.as_str())
    }

    /// Messages of the error's cause chain.
    #[must_use]
    pub fn causes(&self) -> &[String] {
        self.body
            .as_ref()
            .map(|b| b.causes.as_slice())
            .unwrap_or_default()
    }

    /// Reconciled stack, oldest call first.
    #[must_use]
    pub fn stack(&self) -> &[FrameRecord] {
        self.body
            .as_ref()
            .map(|b| b.stack.as_slice())
            .unwrap_or_default()
    }

    /// The original error, when construction failed.
    #[must_use]
    pub fn original_guess(&self) -> Option<&OriginalGuess> {
        self.body.as_ref().and_then(|b| b.original.as_ref())
    }

    /// The failure that forced the degraded report, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&ReportError> {
        self.body.as_ref().and_then(|b| b.failure.as_ref())
    }

    /// The innermost frame.
    ///
    /// On an empty stack a warning is logged and a placeholder frame is
    /// returned: file `unknown`, line `-1`, function
    /// `ExcReport::most_recent_frame`.
    #[must_use]
    pub fn most_recent_frame(&self) -> Cow<'_, FrameRecord> {
        if let Some(frame) = self.stack().last() {
            return Cow::Borrowed(frame);
        }
        tracing::warn!("report has no frames; using placeholder frame");
        Cow::Owned(FrameRecord::new(
            0,
            "unknown",
            -1,
            "ExcReport::most_recent_frame",
        ))
    }

    /// `Kind: args`, plus ` | extras` when given.
    #[must_use]
    pub fn one_liner(&self, extra: &[&dyn Display]) -> String {
        let Some(body) = &self.body else {
            return NO_ACTIVE_ERROR_WARNING.to_owned();
        };
        let mut line = head(body);
        push_extra(&mut line, extra);
        line
    }

    /// The one-liner plus the innermost frame's location.
    #[must_use]
    pub fn short(&self, extra: &[&dyn Display]) -> String {
        let Some(body) = &self.body else {
            return NO_ACTIVE_ERROR_WARNING.to_owned();
        };
        let frame = self.most_recent_frame();
        let mut line = format!(
            "{} | File \"{}\", line {} in {}()",
            head(body),
            frame.file_name(),
            frame.line,
            self.function_name(&frame.function)
        );
        push_extra(&mut line, extra);
        line
    }

    /// Kind and location, the arguments, the responsible source line, then
    /// one line per extra.
    #[must_use]
    pub fn summary(&self, extra: &[&dyn Display]) -> String {
        let Some(body) = &self.body else {
            return NO_ACTIVE_ERROR_WARNING.to_owned();
        };
        let frame = self.most_recent_frame();
        let mut lines = vec![
            format!(
                "{}, File \"{}\", line {} in {}()",
                body.kind,
                frame.file_name(),
                frame.line,
                self.function_name(&frame.function)
            ),
            "Exception args:".to_owned(),
            format!("\t{}", body.args_summary),
            "Responsible code:".to_owned(),
            format!("\t{}", frame.source_line.as_deref().unwrap_or_default()),
        ];
        lines.extend(extra.iter().map(ToString::to_string));
        lines.join("\n")
    }

    /// The summary, the cause chain, and every frame from the innermost
    /// outwards with its source line and locals, framed by separator lines.
    ///
    /// `limit` is zero-based from the innermost frame: `Some(0)` shows one
    /// frame, `None` shows all.
    #[must_use]
    pub fn full(&self, extra: &[&dyn Display], limit: Option<usize>) -> String {
        let Some(body) = &self.body else {
            return NO_ACTIVE_ERROR_WARNING.to_owned();
        };
        let separator = "-".repeat(self.width);
        let mut description = self.summary(extra);

        if !body.causes.is_empty() {
            description.push_str("\nCaused by:");
            for cause in &body.causes {
                let _ = write!(description, "\n\t{cause}");
            }
        }

        let shown = limit.map_or(usize::MAX, |limit| limit.saturating_add(1));
        for frame in body.stack.iter().rev().take(shown) {
            let _ = write!(
                description,
                "\nFile \"{}\", line {} in {}\n\t{}",
                frame.file_name(),
                frame.line,
                self.emphasis.paint(
                    &format!("{}()", frame.function),
                    Style::Fg(Color::BrightWhite)
                ),
                frame.source_line.as_deref().unwrap_or_default()
            );
            if let Some(locals) = &frame.locals {
                description.push_str("\nLocals:\n");
                description.push_str(&self.format_locals(locals));
            }
        }

        format!("\n{separator}\n\n{description}\n{separator}\n")
    }

    fn function_name(&self, function: &str) -> String {
        self.emphasis.paint(function, Style::Fg(Color::BrightWhite))
    }

    fn format_locals(&self, locals: &Locals) -> String {
        let options = self.format.types(false);
        let mut out = String::new();
        for local in locals {
            if local.name.starts_with("__") {
                continue;
            }
            match &local.value {
                Value::Module(_) => continue,
                Value::Function(_) => {
                    let _ = writeln!(out, "\tskipped: {}", local.name);
                    continue;
                }
                _ => {}
            }
            let value = format_value(&local.value, Some(&local.type_name), &options);
            if NAMESPACE_MARKERS.iter().any(|marker| value.starts_with(marker)) {
                continue;
            }
            let (quote, linebreak) = if value.contains('\n') {
                ("\"\"\"", "\n\n")
            } else {
                ("", "\n")
            };
            let type_name = self.emphasis.paint(
                &format!("({})", bare_type_name(&local.type_name)),
                Style::Dim,
            );
            let _ = write!(
                out,
                "\t{}: {quote}{value}{quote} {type_name}{linebreak}",
                local.name
            );
        }
        out
    }
}

impl fmt::Display for ExcReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary(&[]))
    }
}

fn head(body: &ReportBody) -> String {
    if body.args_summary.is_empty() {
        body.kind.clone()
    } else {
        format!("{}: {}", body.kind, body.args_summary)
    }
}

fn push_extra(line: &mut String, extra: &[&dyn Display]) {
    if extra.is_empty() {
        return;
    }
    let joined: Vec<String> = extra.iter().map(ToString::to_string).collect();
    line.push_str(" | ");
    line.push_str(&joined.join(", "));
}
