//! crates/formatting/src/error.rs
//! Errors raised while building a [`Value`](crate::Value).

use thiserror::Error;

/// Failure to introspect a value.
///
/// The formatting entry points never return this; they recover by falling
/// back to a plainer rendering. It surfaces only from constructors such as
/// [`Value::from_serialize`](crate::Value::from_serialize).
#[derive(Debug, Error)]
pub enum FormatError {
    /// The value could not be serialised into a structured form.
    #[error("value could not be serialised: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A user-supplied [`Inspect`](crate::Inspect) or stringifier panicked.
    #[error("rendering {type_name} panicked")]
    Panicked {
        /// Type whose rendering panicked.
        type_name: String,
    },
}
