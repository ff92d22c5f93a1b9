//! crates/report/src/traced.rs
//! Errors carrying the call stack of the site that created them.

use std::error::Error;
use std::fmt;

use crate::frame::{FrameRecord, Locals};
use crate::probe::{BacktraceProbe, StackProbe};

/// Call stack captured where an error was created.
///
/// `frames` are oldest call first and unfiltered; `chain` holds the locals
/// recorded for each frame, by index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorTrace {
    /// Frames, oldest call first.
    pub frames: Vec<FrameRecord>,
    /// Locals per frame index.
    pub chain: Vec<Option<Locals>>,
}

impl ErrorTrace {
    /// Trace over `frames` with no locals recorded.
    #[must_use]
    pub fn new(frames: Vec<FrameRecord>) -> Self {
        let chain = vec![None; frames.len()];
        Self { frames, chain }
    }

    /// Captures the current stack through `probe`.
    ///
    /// A failing probe yields an empty trace; the report then relies on the
    /// ambient stack alone.
    pub fn capture(probe: &dyn StackProbe) -> Self {
        match probe.capture() {
            Ok(frames) => Self::new(frames),
            Err(err) => {
                tracing::debug!(error = %err, "error-site trace unavailable");
                Self::default()
            }
        }
    }

    /// Records `locals` for the frame at `index`.
    pub fn set_locals(&mut self, index: usize, locals: Locals) {
        if self.chain.len() <= index {
            self.chain.resize(index + 1, None);
        }
        self.chain[index] = Some(locals);
    }

    /// Index of the innermost frame.
    #[must_use]
    pub fn innermost(&self) -> Option<usize> {
        self.frames.len().checked_sub(1)
    }
}

/// An error paired with the trace of the site that created it.
///
/// Displays and chains like the wrapped error.
///
/// ```
/// use report::{Traced, locals};
///
/// fn parse_port(raw: &str) -> Result<u16, Traced<std::num::ParseIntError>> {
///     raw.parse().map_err(|err| Traced::new(err).with_locals(locals!(raw)))
/// }
///
/// let err = parse_port("http").unwrap_err();
/// assert_eq!(err.to_string(), "invalid digit found in string");
/// ```
#[derive(Debug)]
pub struct Traced<E> {
    error: E,
    trace: ErrorTrace,
}

impl<E> Traced<E> {
    /// Wraps `error`, capturing the current stack.
    #[inline(never)]
    pub fn new(error: E) -> Self {
        Self {
            error,
            trace: ErrorTrace::capture(&BacktraceProbe::new()),
        }
    }

    /// Wraps `error` with an explicit trace.
    pub const fn with_trace(error: E, trace: ErrorTrace) -> Self {
        Self { error, trace }
    }

    /// Records locals for the innermost frame.
    #[must_use]
    pub fn with_locals(mut self, locals: Locals) -> Self {
        let index = self.trace.innermost().unwrap_or(0);
        self.trace.set_locals(index, locals);
        self
    }

    /// Records locals for the frame at `index`.
    #[must_use]
    pub fn with_locals_at(mut self, index: usize, locals: Locals) -> Self {
        self.trace.set_locals(index, locals);
        self
    }

    /// The wrapped error.
    pub const fn inner(&self) -> &E {
        &self.error
    }

    /// Unwraps the error, discarding the trace.
    pub fn into_inner(self) -> E {
        self.error
    }

    /// The captured trace.
    pub const fn trace(&self) -> &ErrorTrace {
        &self.trace
    }
}

impl<E: fmt::Display> fmt::Display for Traced<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl<E: Error> Error for Traced<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.error.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::FixedProbe;

    fn trace() -> ErrorTrace {
        ErrorTrace::new(vec![
            FrameRecord::new(0, "src/main.rs", 3, "main"),
            FrameRecord::new(1, "src/lib.rs", 9, "load"),
        ])
    }

    #[test]
    fn locals_go_to_innermost_frame_by_default() {
        let traced = Traced::with_trace(std::fmt::Error, trace())
            .with_locals(Locals::new().with("path", "cfg.toml"));
        assert_eq!(traced.trace().chain.len(), 2);
        assert!(traced.trace().chain[0].is_none());
        assert!(traced.trace().chain[1].is_some());
    }

    #[test]
    fn locals_at_index_extend_chain() {
        let traced = Traced::with_trace(std::fmt::Error, ErrorTrace::default())
            .with_locals_at(2, Locals::new().with("n", &1));
        assert_eq!(traced.trace().chain.len(), 3);
        assert!(traced.trace().chain[2].is_some());
    }

    #[test]
    fn capture_uses_probe() {
        let probe = FixedProbe(trace().frames);
        let captured = ErrorTrace::capture(&probe);
        assert_eq!(captured, trace());
    }

    #[test]
    fn display_and_source_follow_inner_error() {
        #[derive(Debug)]
        struct Outer(std::fmt::Error);
        impl fmt::Display for Outer {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("outer failed")
            }
        }
        impl Error for Outer {
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                Some(&self.0)
            }
        }
        let traced = Traced::with_trace(Outer(std::fmt::Error), trace());
        assert_eq!(traced.to_string(), "outer failed");
        assert!(traced.source().is_some());
        assert!(matches!(traced.into_inner(), Outer(_)));
    }
}
