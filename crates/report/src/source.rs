//! crates/report/src/source.rs
//! Source line lookup, reading each file at most once.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Cache of source files split into lines.
///
/// Unreadable files are remembered as missing so they are not retried.
#[derive(Debug, Default)]
pub struct SourceCache {
    files: HashMap<PathBuf, Option<Rc<[String]>>>,
}

impl SourceCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the trimmed text of one-based `line` in `file`.
    pub fn line(&mut self, file: impl AsRef<Path>, line: i64) -> Option<String> {
        let index = usize::try_from(line).ok()?.checked_sub(1)?;
        let lines = self.lines(file.as_ref())?;
        lines.get(index).map(|text| text.trim().to_owned())
    }

    /// Number of files read so far, including unreadable ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether nothing has been read yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn lines(&mut self, file: &Path) -> Option<Rc<[String]>> {
        self.files
            .entry(file.to_path_buf())
            .or_insert_with(|| match fs::read_to_string(file) {
                Ok(text) => Some(text.lines().map(str::to_owned).collect()),
                Err(err) => {
                    tracing::debug!(file = %file.display(), error = %err, "source unavailable");
                    None
                }
            })
            .clone()
    }
}

thread_local! {
    static CACHE: RefCell<SourceCache> = RefCell::new(SourceCache::new());
}

/// Looks `line` of `file` up in this thread's shared cache.
pub fn source_line(file: &str, line: i64) -> Option<String> {
    CACHE
        .try_with(|cache| {
            cache
                .try_borrow_mut()
                .ok()
                .and_then(|mut cache| cache.line(file, line))
        })
        .ok()
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_trimmed_lines() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "fn main() {{").expect("write");
        writeln!(file, "    let x = parse()?;").expect("write");
        writeln!(file, "}}").expect("write");

        let mut cache = SourceCache::new();
        assert_eq!(cache.line(file.path(), 2).as_deref(), Some("let x = parse()?;"));
        assert_eq!(cache.line(file.path(), 1).as_deref(), Some("fn main() {"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn out_of_range_lines_are_none() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "only").expect("write");
        let mut cache = SourceCache::new();
        assert_eq!(cache.line(file.path(), 0), None);
        assert_eq!(cache.line(file.path(), -1), None);
        assert_eq!(cache.line(file.path(), 2), None);
    }

    #[test]
    fn files_are_read_once() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("lib.rs");
        fs::write(&path, "first\n").expect("write");

        let mut cache = SourceCache::new();
        assert_eq!(cache.line(&path, 1).as_deref(), Some("first"));
        fs::write(&path, "changed\n").expect("rewrite");
        assert_eq!(cache.line(&path, 1).as_deref(), Some("first"));
    }

    #[test]
    fn missing_files_are_remembered() {
        let mut cache = SourceCache::new();
        assert_eq!(cache.line("/definitely/not/here.rs", 1), None);
        assert_eq!(cache.len(), 1);
        assert_eq!(source_line("/definitely/not/here.rs", 1), None);
    }
}
