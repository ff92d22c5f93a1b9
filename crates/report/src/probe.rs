//! crates/report/src/probe.rs
//! Capturing the current call stack.
//!
//! [`BacktraceProbe`] captures through [`std::backtrace::Backtrace`] and
//! parses its textual form. The parser is exposed as [`parse_backtrace`] so
//! recorded backtraces can be turned into frames as well.

use std::backtrace::Backtrace;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ReportError;
use crate::frame::FrameRecord;

/// Source of the ambient call stack.
pub trait StackProbe {
    /// Returns the current stack, oldest call first, indexed from zero.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Probe`] when no stack can be produced.
    fn capture(&self) -> Result<Vec<FrameRecord>, ReportError>;
}

impl<P: StackProbe + ?Sized> StackProbe for &P {
    fn capture(&self) -> Result<Vec<FrameRecord>, ReportError> {
        (**self).capture()
    }
}

impl<P: StackProbe + ?Sized> StackProbe for Box<P> {
    fn capture(&self) -> Result<Vec<FrameRecord>, ReportError> {
        (**self).capture()
    }
}

/// Function path prefixes treated as the probe's own machinery.
const DEFAULT_INTERNAL_PREFIXES: &[&str] = &[
    "std::",
    "core::",
    "alloc::",
    "backtrace::",
    "report::",
    "investigate::",
    "debugkit::",
];

/// Symbol prefixes of unwinding and start-up shims.
const RUNTIME_SHIM_PREFIXES: &[&str] = &["__rust", "rust_", "__libc", "_start"];

/// Probe backed by [`Backtrace::force_capture`].
///
/// Frames whose function belongs to the standard library or to this
/// workspace are dropped wherever they sit. Unresolved frames and runtime
/// shims left innermost are dropped as well, followed by `skip` more frames,
/// so the innermost frame is the code that asked for the stack.
#[derive(Clone, Debug)]
pub struct BacktraceProbe {
    skip: usize,
    internal_prefixes: Vec<String>,
}

impl BacktraceProbe {
    /// Probe with the default internal prefixes and no extra skip.
    #[must_use]
    pub fn new() -> Self {
        Self {
            skip: 0,
            internal_prefixes: DEFAULT_INTERNAL_PREFIXES
                .iter()
                .map(|p| (*p).to_owned())
                .collect(),
        }
    }

    /// Drops `skip` additional innermost frames after the internal ones.
    #[must_use]
    pub const fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Treats functions starting with `prefix` as internal.
    #[must_use]
    pub fn internal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.internal_prefixes.push(prefix.into());
        self
    }

    fn is_internal(&self, function: &str) -> bool {
        let function = function.trim_start_matches('<');
        self.internal_prefixes
            .iter()
            .any(|prefix| function.starts_with(prefix.as_str()))
    }

    /// Turns innermost-first parsed frames into the probe's result.
    fn finish(&self, innermost_first: Vec<FrameRecord>) -> Vec<FrameRecord> {
        let mut frames: Vec<FrameRecord> = innermost_first
            .into_iter()
            .filter(|frame| !self.is_internal(&frame.function))
            .skip_while(|frame| frame.file.is_none() || is_runtime_shim(&frame.function))
            .skip(self.skip)
            .collect();
        frames.reverse();
        for (index, frame) in frames.iter_mut().enumerate() {
            frame.index = index;
        }
        frames
    }
}

impl Default for BacktraceProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl StackProbe for BacktraceProbe {
    #[inline(never)]
    fn capture(&self) -> Result<Vec<FrameRecord>, ReportError> {
        let text = Backtrace::force_capture().to_string();
        let parsed = parse_backtrace(&text);
        if parsed.is_empty() {
            return Err(ReportError::Probe(
                "backtrace contained no frames; symbols may be unavailable".to_owned(),
            ));
        }
        Ok(self.finish(parsed))
    }
}

fn is_runtime_shim(function: &str) -> bool {
    RUNTIME_SHIM_PREFIXES
        .iter()
        .any(|prefix| function.starts_with(prefix))
}

/// Probe returning a fixed, pre-captured stack.
#[derive(Clone, Debug, Default)]
pub struct FixedProbe(pub Vec<FrameRecord>);

impl StackProbe for FixedProbe {
    fn capture(&self) -> Result<Vec<FrameRecord>, ReportError> {
        Ok(self.0.clone())
    }
}

/// Parses the [`Display`](std::fmt::Display) form of a [`Backtrace`].
///
/// Frames are returned innermost first, as printed, with `index` set to the
/// printed frame number. Frames without an `at file:line:col` line have no
/// file.
#[must_use]
pub fn parse_backtrace(text: &str) -> Vec<FrameRecord> {
    static FRAME_RE: OnceLock<Regex> = OnceLock::new();
    static LOCATION_RE: OnceLock<Regex> = OnceLock::new();

    let frame_re = FRAME_RE.get_or_init(|| Regex::new(r"^\s*(\d+): (.+)$").expect("valid regex"));
    let location_re =
        LOCATION_RE.get_or_init(|| Regex::new(r"^\s*at (.+):(\d+):(\d+)$").expect("valid regex"));

    let mut frames: Vec<FrameRecord> = Vec::new();
    for line in text.lines() {
        if let Some(caps) = frame_re.captures(line) {
            let index = caps[1].parse().unwrap_or(frames.len());
            frames.push(FrameRecord::unresolved(index, strip_hash(caps[2].trim())));
        } else if let Some(caps) = location_re.captures(line) {
            let Some(frame) = frames.last_mut() else {
                continue;
            };
            if frame.file.is_none() {
                frame.file = Some(caps[1].to_owned());
                frame.line = caps[2].parse().unwrap_or(-1);
            }
        }
    }
    frames
}

/// Removes the `::h0123456789abcdef` suffix of a mangled symbol.
fn strip_hash(function: &str) -> String {
    static HASH_RE: OnceLock<Regex> = OnceLock::new();
    let re = HASH_RE.get_or_init(|| Regex::new(r"::h[0-9a-f]{16}$").expect("valid regex"));
    re.replace(function, "").into_owned()
}

#[cfg(test)]
mod tests;
