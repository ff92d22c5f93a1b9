//! crates/investigate/src/error.rs

use thiserror::Error;

/// Failure to resolve a variable path logged by [`on_return`](crate::on_return).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LookupError {
    /// The first segment names neither an argument nor `return`.
    #[error("no argument or return value named '{0}'")]
    Unknown(String),
    /// A later segment does not exist in the value reached so far.
    #[error("'{path}' has no field '{field}'")]
    MissingField {
        /// Path resolved so far.
        path: String,
        /// Segment that could not be followed.
        field: String,
    },
}
