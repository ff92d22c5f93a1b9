#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/report/src/lib.rs
//!
//! # Overview
//!
//! `report` builds diagnostic reports for errors that have been caught:
//! the error's kind and arguments, its cause chain, and a call stack with
//! the responsible source line and the locals recorded at the error site.
//! The same report renders at four levels of detail: [`ExcReport::one_liner`],
//! [`ExcReport::short`], [`ExcReport::summary`] and [`ExcReport::full`].
//!
//! # Design
//!
//! Two stacks feed a report. The error-site trace travels with the error in
//! a [`Traced`] wrapper, together with the locals recorded through
//! [`locals!`]. The ambient stack is captured where the report is built,
//! through a [`StackProbe`]. Both are filtered with a [`FrameFilter`] that
//! hides toolchain, registry and IDE frames, then spliced together by
//! [`reconcile`] at their first shared file. Source lines are read lazily
//! and cached per thread.
//!
//! Errors being handled are registered per thread with [`enter`]; a
//! [`ReportBuilder`] without an explicit error reports on the innermost one.
//!
//! # Invariants
//!
//! - [`ReportBuilder::build`] never fails and never panics. Failures while
//!   assembling a report produce a degraded report that names the failure
//!   and, when known, the original error.
//! - Without an error every renderer returns [`NO_ACTIVE_ERROR_WARNING`].
//! - Filtered frames keep their original index, so error-site locals are
//!   matched to the frame they were recorded for.
//! - Locals are shown only for error-site frames.
//!
//! # Examples
//!
//! ```
//! use emphasis::ColorMode;
//! use report::{CapturedError, ErrorTrace, FrameRecord, Locals, ReportBuilder, Traced};
//!
//! let trace = ErrorTrace::new(vec![
//!     FrameRecord::new(0, "src/main.rs", 4, "main").with_source_line("load()?;"),
//!     FrameRecord::new(1, "src/config.rs", 9, "load").with_source_line("let port = raw.parse()?;"),
//! ]);
//! let err = Traced::with_trace("http".parse::<u16>().unwrap_err(), trace)
//!     .with_locals(Locals::new().with("raw", "http"));
//!
//! let report = ReportBuilder::new()
//!     .error(CapturedError::from(&err))
//!     .ambient_stack(Vec::new())
//!     .color(ColorMode::Never)
//!     .build();
//! assert_eq!(
//!     report.short(&[]),
//!     "ParseIntError: invalid digit found in string | File \"src/config.rs\", line 9 in load()"
//! );
//! assert!(report.full(&[], None).contains("\traw: \"http\" (str)\n"));
//! ```

mod builder;
mod captured;
mod error;
mod filter;
mod frame;
mod handler;
mod probe;
mod reconcile;
mod render;
mod source;
mod traced;

pub use builder::{OriginalGuess, ReportBuilder};
pub use captured::CapturedError;
pub use error::ReportError;
pub use filter::{DEFAULT_IRRELEVANT_PATTERNS, FrameFilter};
pub use frame::{FrameRecord, Local, Locals};
pub use handler::{HandlerScope, current, depth, enter, handling};
pub use probe::{BacktraceProbe, FixedProbe, StackProbe, parse_backtrace};
pub use reconcile::{attach_locals, overlap_index, reconcile};
pub use render::{ExcReport, NO_ACTIVE_ERROR_WARNING};
pub use source::{SourceCache, source_line};
pub use traced::{ErrorTrace, Traced};
