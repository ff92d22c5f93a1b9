#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging/src/lib.rs
//!
//! # Overview
//!
//! `logging` is the leveled-output collaborator of the debugkit workspace. The
//! formatter and report builder never decide where text goes; they hand a
//! rendered message and a [`Level`] to a [`LogSink`]. This crate owns the
//! pieces around that hand-off:
//!
//! - [`Level`] and its parsing rules (names, aliases, numeric values),
//! - [`LogConfig`], resolved once from `DEBUGKIT_LOG_LEVEL` and
//!   `DEBUGKIT_VERBOSE` by the surrounding process,
//! - per-thread configuration and event capture ([`init`], [`enabled`],
//!   [`drain_events`]),
//! - sinks: [`WriterSink`] for any [`std::io::Write`], [`EventSink`] for
//!   capture, [`TracingSink`] for forwarding into `tracing`,
//! - [`CaptureLayer`] and [`init_tracing`], which bridge `tracing` events back
//!   into the thread-local event buffer.
//!
//! # Invariants
//!
//! - Configuration and captured events are thread-local. Two threads logging
//!   concurrently never observe each other's state.
//! - `DEBUGKIT_LOG_LEVEL=none` yields a configuration with
//!   [`LogConfig::disabled`] set; [`LogConfig::allows`] then rejects every
//!   level.
//!
//! # Examples
//!
//! ```
//! use logging::{Level, LineMode, LogConfig, LogSink, WriterSink};
//!
//! let config = LogConfig::from_vars(Some("warning"), None);
//! assert!(config.allows(Level::Error));
//! assert!(!config.allows(Level::Info));
//!
//! let mut sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithNewline);
//! sink.emit(Level::Warning, "disk almost full")?;
//! assert_eq!(sink.into_inner(), b"disk almost full\n".to_vec());
//! # Ok::<(), std::io::Error>(())
//! ```

mod config;
mod levels;
mod line_mode;
mod sink;
mod thread_local;
mod tracing_bridge;

pub use config::{LOG_LEVEL_ENV, LogConfig, VERBOSE_ENV};
pub use levels::{Level, ParseLevelError, parse_level_lenient};
pub use line_mode::LineMode;
pub use sink::{EventSink, LogSink, WriterSink};
pub use thread_local::{LogEvent, config, drain_events, emit, enabled, init, verbose};
pub use tracing_bridge::{CaptureLayer, TracingSink, init_tracing};
