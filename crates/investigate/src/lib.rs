#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/investigate/src/lib.rs
//!
//! # Overview
//!
//! `investigate` is the interactive end of debugkit: a leveled [`Logger`]
//! that formats whatever it is handed, and wrappers that log a call's
//! arguments, result or failure.
//!
//! # Design
//!
//! Log calls take a slice of [`Arg`]s, usually built with [`args!`] or
//! [`log_vars!`]. [`fmt_args`] joins them into one message: strings ending in
//! `:` act as labels for the following value, and long multi-argument
//! messages are split one argument per line. The [`Logger`] then paints the
//! message by [`Tone`] and hands it to a [`LogSink`](logging::LogSink) when
//! its [`LogConfig`](logging::LogConfig) allows the level.
//!
//! Call wrappers take the call's [`CallSig`], captured with [`call_sig!`],
//! and a closure running the call. [`investigate`] additionally logs a full
//! report from the `report` crate when the call returns an error.
//!
//! # Invariants
//!
//! - Wrappers return the wrapped call's value or error unchanged; panics are
//!   logged and resumed.
//! - Return values are capped at 300 characters.
//! - A disabled [`LogConfig`](logging::LogConfig) makes every [`Logger`]
//!   method a no-op.
//!
//! # Examples
//!
//! ```
//! use emphasis::Emphasis;
//! use formatting::FormatOptions;
//! use investigate::{InvestigateOptions, Logger, args, call_sig, log_in_out};
//! use logging::{LogConfig, WriterSink};
//!
//! let mut logger = Logger::new(WriterSink::new(Vec::new()), LogConfig::default())
//!     .emphasis(Emphasis::plain());
//! logger.title(&args!["phase:", 2]);
//! assert_eq!(logger.into_sink().into_inner(), b"phase: 2\n".to_vec());
//!
//! let mut sink = WriterSink::new(Vec::new());
//! let options = InvestigateOptions::new()
//!     .format_options(FormatOptions::new().emphasis(Emphasis::plain()));
//! let (a, b) = (2, 3);
//! let sum = log_in_out(&mut sink, &call_sig!(add(a, b)), &options, || a + b);
//! assert_eq!(sum, 5);
//! assert_eq!(sink.into_inner(), "add(a=2, b=3) → 5\n".as_bytes().to_vec());
//! ```

mod args;
mod calls;
mod describe;
mod error;
mod logger;
mod signature;

pub use args::{Arg, WRAP_THRESHOLD, fmt_arg, fmt_args};
pub use calls::{
    InvestigateOptions, RETURN_VARIABLE, investigate, investigate_traced, log_in_out, log_return,
    on_return, resolve,
};
pub use describe::describe;
pub use error::LookupError;
pub use logger::{CallOptions, Logger, Tone};
pub use signature::{CallSig, pretty_retval, pretty_sig};

#[doc(hidden)]
pub mod __private {
    pub use formatting::FormatOptions;
}
