#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/formatting/src/lib.rs
//!
//! # Overview
//!
//! `formatting` turns arbitrary runtime values into bounded, readable text.
//! It backs the diagnostic reports in the `report` crate and the call logging
//! in `investigate`.
//!
//! # Design
//!
//! Values are first captured as an owned [`Value`] tree through the
//! [`Inspect`] trait, then rendered by [`format_value`] (or [`pformat`], which
//! does both). Rendering dispatches on the shape of the value:
//!
//! 1. mappings go through a width-aware pretty printer (80 columns) that
//!    elides containers nested deeper than the requested depth;
//! 2. type values print as their bare name (`Vec<String>`);
//! 3. lists, tuples and sets with depth remaining are rebuilt element by
//!    element, children rendered without type annotations at one less depth;
//! 4. everything else, including single-word strings, goes through the
//!    configured [`Stringifier`], followed by a dimmed `(Type)` when
//!    [`FormatOptions::types`] is set. Top-level strings containing a space
//!    or ending in `:` are prose and print unquoted.
//!
//! Every result then has `<path::Name object at 0xADDR>` placeholders
//! rewritten to `Name (0xADDR)`.
//!
//! # Invariants
//!
//! - Formatting never panics outward. Panicking [`Inspect`] implementations
//!   and custom stringifiers fall back to a plain rendering.
//! - Output size is bounded by the value tree: nesting past a fixed limit is
//!   elided.
//! - [`truncate`] returns exactly `cap + 3` characters for longer input.
//!
//! # Examples
//!
//! ```
//! use emphasis::Emphasis;
//! use formatting::{FormatOptions, Value, format_value, pformat};
//!
//! let options = FormatOptions::new().emphasis(Emphasis::plain());
//! assert_eq!(pformat(&(1, "a"), &options), "(1, \"a\")");
//!
//! let config = Value::map([(Value::str("retries"), Value::Int(3))]);
//! assert_eq!(format_value(&config, None, &options), "{\"retries\": 3}");
//! ```

mod error;
mod format;
mod inspect;
mod names;
mod options;
mod pretty;
mod truncate;
mod value;

pub use error::FormatError;
pub use format::{format_value, pformat};
pub use inspect::Inspect;
pub use names::{bare_type_name, rewrite_objects};
pub use options::{FormatOptions, Stringifier};
pub use truncate::{ELLIPSIS, EXC_ARG_CAP, RETURN_VALUE_CAP, truncate};
pub use value::{SeqKind, Value};
