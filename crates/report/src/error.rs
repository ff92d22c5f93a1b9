//! crates/report/src/error.rs
//! Failures raised while assembling a report.

use thiserror::Error;

/// Error produced while assembling a report.
///
/// These never escape [`ReportBuilder::build`](crate::ReportBuilder::build);
/// they select its self-failure path and are kept on the resulting report
/// for inspection through [`ExcReport::failure`](crate::ExcReport::failure).
#[derive(Clone, Debug, Error)]
pub enum ReportError {
    /// A frame filter pattern did not compile.
    #[error("failed to compile frame filter pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: globset::Error,
    },
    /// The stack probe could not produce frames.
    #[error("stack probe failed: {0}")]
    Probe(String),
    /// The live-locals chain was walked past a frame that still needed it.
    #[error("frame index {index} is behind the locals chain position {steps}")]
    LocalsOutOfOrder {
        /// Index of the frame being processed.
        index: usize,
        /// Chain entries already consumed.
        steps: usize,
    },
    /// The ambient handler stack could not be read.
    #[error("active error slot is unavailable: {0}")]
    HandlerUnavailable(String),
    /// Introspection panicked.
    #[error("report construction panicked: {0}")]
    Panicked(String),
}

impl ReportError {
    /// Short variant name, used when describing the failure inside a report.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => "ReportError::InvalidPattern",
            Self::Probe(_) => "ReportError::Probe",
            Self::LocalsOutOfOrder { .. } => "ReportError::LocalsOutOfOrder",
            Self::HandlerUnavailable(_) => "ReportError::HandlerUnavailable",
            Self::Panicked(_) => "ReportError::Panicked",
        }
    }

    pub(crate) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_owned());
        Self::Panicked(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::GlobBuilder;
    use std::error::Error as _;

    #[test]
    fn invalid_pattern_preserves_source() {
        let glob_err = GlobBuilder::new("[").build().unwrap_err();
        let error = ReportError::InvalidPattern {
            pattern: "[".into(),
            source: glob_err.clone(),
        };
        assert!(error.to_string().contains("'['"));
        assert_eq!(
            error.source().map(ToString::to_string),
            Some(glob_err.to_string())
        );
        assert_eq!(error.kind(), "ReportError::InvalidPattern");
    }

    #[test]
    fn panic_payloads_are_described() {
        let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert_eq!(
            ReportError::from_panic(boxed.as_ref()).to_string(),
            "report construction panicked: boom"
        );
        let owned: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert!(matches!(
            ReportError::from_panic(owned.as_ref()),
            ReportError::Panicked(message) if message == "owned"
        ));
    }
}
