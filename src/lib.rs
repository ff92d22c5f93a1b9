#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! src/lib.rs
//!
//! # Overview
//!
//! `debugkit` bundles the workspace crates behind one dependency:
//!
//! - [`formatting`]: bounded, readable rendering of runtime values;
//! - [`report`]: diagnostic reports for caught errors;
//! - [`investigate`]: leveled value logging and call tracing;
//! - [`logging`]: levels, environment configuration and sinks;
//! - [`emphasis`]: terminal emphasis and width.
//!
//! The [`prelude`] imports the everyday names and macros.
//!
//! # Examples
//!
//! ```
//! use debugkit::prelude::*;
//!
//! fn parse_port(raw: &str) -> Result<u16, Traced<std::num::ParseIntError>> {
//!     raw.parse().map_err(|err| Traced::new(err).with_locals(locals!(raw)))
//! }
//!
//! let err = parse_port("http").unwrap_err();
//! let report = ReportBuilder::new()
//!     .error(CapturedError::from(&err))
//!     .color(ColorMode::Never)
//!     .build();
//! assert_eq!(report.one_liner(&[]), "ParseIntError: invalid digit found in string");
//! ```

pub use emphasis;
pub use formatting;
pub use investigate;
pub use logging;
pub use report;

/// Everyday names: formatting, reports, logging and their macros.
pub mod prelude {
    pub use emphasis::{ColorMode, Emphasis};
    pub use formatting::{FormatOptions, Inspect, Stringifier, Value, format_value, pformat};
    pub use investigate::{
        Arg, CallSig, InvestigateOptions, Logger, args, call_sig, describe, investigate,
        investigate_traced, log_in_out, log_return, log_vars, on_return, vprint,
    };
    pub use logging::{Level, LogConfig, LogSink, WriterSink};
    pub use report::{
        CapturedError, ExcReport, ReportBuilder, Traced, enter, handling, locals,
    };
}
