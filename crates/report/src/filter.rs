//! crates/report/src/filter.rs
//! Removal of frames that belong to the toolchain, registry crates or IDEs.

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::ReportError;
use crate::frame::FrameRecord;

/// File patterns whose frames are dropped from every report.
///
/// `*` matches across path separators, so each pattern applies at any depth.
pub const DEFAULT_IRRELEVANT_PATTERNS: &[&str] = &[
    "/rustc/*",
    "*/.rustup/*",
    "*/.cargo/registry/*",
    "*/.cargo/git/*",
    "*/library/std/src/*",
    "*/library/core/src/*",
    "*/library/alloc/src/*",
    "*/.vscode/extensions/*",
    "*/JetBrains/*",
];

/// Compiled set of irrelevant-file patterns.
///
/// A frame is irrelevant when its file matches any pattern, or when it has
/// no resolvable file at all.
///
/// ```
/// use report::{FrameFilter, FrameRecord};
///
/// let filter = FrameFilter::with_defaults();
/// let frames = vec![
///     FrameRecord::new(0, "/rustc/abc/library/std/src/rt.rs", 10, "lang_start"),
///     FrameRecord::new(1, "src/main.rs", 4, "main"),
///     FrameRecord::unresolved(2, "<unknown>"),
/// ];
/// let kept = filter.retain(frames);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].index, 1);
/// ```
#[derive(Clone, Debug)]
pub struct FrameFilter {
    set: GlobSet,
    patterns: Vec<String>,
}

impl FrameFilter {
    /// Compiles `patterns`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidPattern`] for the first pattern that
    /// is not a valid glob.
    pub fn new<I, S>(patterns: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::new();
        for pattern in patterns {
            let pattern = pattern.into();
            let glob = Glob::new(&pattern).map_err(|source| ReportError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
            kept.push(pattern);
        }
        let set = builder
            .build()
            .map_err(|source| ReportError::InvalidPattern {
                pattern: kept.join(", "),
                source,
            })?;
        Ok(Self {
            set,
            patterns: kept,
        })
    }

    /// Filter built from [`DEFAULT_IRRELEVANT_PATTERNS`].
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_IRRELEVANT_PATTERNS.iter().copied())
            .expect("default frame patterns compile")
    }

    /// Defaults plus `extra` patterns.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidPattern`] when an extra pattern is
    /// invalid.
    pub fn with_extra<I, S>(extra: I) -> Result<Self, ReportError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = DEFAULT_IRRELEVANT_PATTERNS
            .iter()
            .map(|p| (*p).to_owned())
            .chain(extra.into_iter().map(Into::into));
        Self::new(patterns)
    }

    /// Filter that only drops frames without a file.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }

    /// Patterns in compilation order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Whether `frame` should be hidden.
    #[must_use]
    pub fn is_irrelevant(&self, frame: &FrameRecord) -> bool {
        frame
            .file
            .as_deref()
            .is_none_or(|file| file.is_empty() || self.set.is_match(file))
    }

    /// Keeps the relevant frames, preserving order and original indices.
    #[must_use]
    pub fn retain(&self, frames: Vec<FrameRecord>) -> Vec<FrameRecord> {
        frames
            .into_iter()
            .filter(|frame| !self.is_irrelevant(frame))
            .collect()
    }
}

impl Default for FrameFilter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(index: usize, file: &str) -> FrameRecord {
        FrameRecord::new(index, file, 1, "f")
    }

    #[test]
    fn defaults_drop_toolchain_and_registry_frames() {
        let filter = FrameFilter::with_defaults();
        for file in [
            "/rustc/90b35a6239c3d8bdabc530a6a0816f7ff89a0aaf/library/core/src/ops/function.rs",
            "/home/dev/.cargo/registry/src/index.crates.io-6f17d22bba15001f/tokio-1.0.0/src/lib.rs",
            "/home/dev/.rustup/toolchains/stable/lib/rustlib/src/rust/library/std/src/rt.rs",
            "C:/Users/dev/AppData/JetBrains/plugin/src/x.rs",
        ] {
            assert!(filter.is_irrelevant(&frame(0, file)), "{file}");
        }
        assert!(!filter.is_irrelevant(&frame(0, "src/main.rs")));
        assert!(!filter.is_irrelevant(&frame(0, "/srv/app/crates/api/src/lib.rs")));
    }

    #[test]
    fn frames_without_files_are_irrelevant() {
        let filter = FrameFilter::empty();
        assert!(filter.is_irrelevant(&FrameRecord::unresolved(0, "?")));
        assert!(filter.is_irrelevant(&frame(0, "")));
        assert!(!filter.is_irrelevant(&frame(0, "a.rs")));
    }

    #[test]
    fn retain_preserves_indices() {
        let filter = FrameFilter::new(["*vendor*"]).expect("valid pattern");
        let kept = filter.retain(vec![frame(0, "a.rs"), frame(1, "vendor/b.rs"), frame(2, "c.rs")]);
        let indices: Vec<usize> = kept.iter().map(|f| f.index).collect();
        assert_eq!(indices, [0, 2]);
    }

    #[test]
    fn invalid_patterns_are_reported() {
        let err = FrameFilter::with_extra(["src/[oops"]).unwrap_err();
        match err {
            ReportError::InvalidPattern { pattern, .. } => assert_eq!(pattern, "src/[oops"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
