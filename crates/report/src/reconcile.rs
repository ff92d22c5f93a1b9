//! crates/report/src/reconcile.rs
//! Merging the error-site trace into the ambient stack.
//!
//! Both inputs are ordered oldest call first. The error-site trace carries
//! the precise frames leading to the error; the ambient stack carries every
//! caller up to the point where the report is built. Splicing them at their
//! first shared file yields one coherent stack.

use crate::error::ReportError;
use crate::frame::{FrameRecord, Locals};

/// Index of the first ambient frame in the same file as the first error-site
/// frame.
#[must_use]
pub fn overlap_index(ambient: &[FrameRecord], error_trace: &[FrameRecord]) -> Option<usize> {
    let first = error_trace.first()?;
    ambient.iter().position(|frame| frame.file == first.file)
}

/// Replaces the ambient stack from the overlap onwards with the error-site
/// trace, or appends the trace when the two share no file.
///
/// ```
/// use report::{FrameRecord, reconcile};
///
/// let a = FrameRecord::new(0, "a.rs", 1, "a");
/// let b = FrameRecord::new(1, "b.rs", 2, "b");
/// let c = FrameRecord::new(2, "c.rs", 3, "c");
/// let b2 = FrameRecord::new(0, "b.rs", 9, "b");
/// let d = FrameRecord::new(1, "d.rs", 4, "d");
///
/// let merged = reconcile(vec![a.clone(), b, c], vec![b2.clone(), d.clone()]);
/// assert_eq!(merged, vec![a, b2, d]);
/// ```
#[must_use]
pub fn reconcile(mut ambient: Vec<FrameRecord>, error_trace: Vec<FrameRecord>) -> Vec<FrameRecord> {
    if let Some(at) = overlap_index(&ambient, &error_trace) {
        ambient.truncate(at);
    }
    ambient.extend(error_trace);
    ambient
}

/// Attaches locals from `chain` to filtered error-site `frames`.
///
/// `chain` holds one entry per frame of the unfiltered trace, in index order.
/// Entries belonging to removed frames are skipped; each retained frame
/// consumes exactly one entry. Frames past the end of the chain get no
/// locals.
///
/// # Errors
///
/// Returns [`ReportError::LocalsOutOfOrder`] when a frame's index is behind
/// the entries already consumed, which happens only when `frames` are not in
/// ascending index order.
pub fn attach_locals(
    frames: &mut [FrameRecord],
    chain: &[Option<Locals>],
) -> Result<(), ReportError> {
    let mut steps = 0;
    for frame in frames.iter_mut() {
        if frame.index < steps {
            tracing::warn!(
                index = frame.index,
                steps,
                "frame index behind locals chain"
            );
            return Err(ReportError::LocalsOutOfOrder {
                index: frame.index,
                steps,
            });
        }
        steps = frame.index;
        frame.locals = chain.get(steps).cloned().flatten();
        steps += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(index: usize, file: &str) -> FrameRecord {
        FrameRecord::new(index, file, i64::try_from(index).unwrap_or(0) + 1, file)
    }

    #[test]
    fn splices_at_first_shared_file() {
        let ambient = vec![frame(0, "a"), frame(1, "b"), frame(2, "c")];
        let trace = vec![frame(0, "b"), frame(1, "d")];
        let merged = reconcile(ambient, trace);
        let files: Vec<&str> = merged.iter().map(FrameRecord::file_name).collect();
        assert_eq!(files, ["a", "b", "d"]);
        assert_eq!(merged[1].index, 0);
    }

    #[test]
    fn appends_without_overlap() {
        let merged = reconcile(vec![frame(0, "a")], vec![frame(0, "x")]);
        let files: Vec<&str> = merged.iter().map(FrameRecord::file_name).collect();
        assert_eq!(files, ["a", "x"]);
    }

    #[test]
    fn empty_trace_leaves_ambient_alone() {
        let ambient = vec![frame(0, "a"), frame(1, "b")];
        assert_eq!(reconcile(ambient.clone(), Vec::new()), ambient);
        assert_eq!(overlap_index(&ambient, &[]), None);
    }

    #[test]
    fn overlap_uses_first_match() {
        let ambient = vec![frame(0, "a"), frame(1, "b"), frame(2, "b")];
        assert_eq!(overlap_index(&ambient, &[frame(0, "b")]), Some(1));
    }

    #[test]
    fn locals_skip_removed_frames() {
        let chain = vec![
            Some(Locals::new().with("zero", &0)),
            Some(Locals::new().with("one", &1)),
            Some(Locals::new().with("two", &2)),
            None,
        ];
        let mut frames = vec![frame(0, "a"), frame(2, "c"), frame(3, "d")];
        attach_locals(&mut frames, &chain).expect("ordered frames");
        assert!(frames[0].locals.as_ref().is_some_and(|l| l.get("zero").is_some()));
        assert!(frames[1].locals.as_ref().is_some_and(|l| l.get("two").is_some()));
        assert!(frames[2].locals.is_none());
    }

    #[test]
    fn short_chain_leaves_frames_bare() {
        let mut frames = vec![frame(5, "late")];
        attach_locals(&mut frames, &[None]).expect("ordered frames");
        assert!(frames[0].locals.is_none());
    }

    #[test]
    fn out_of_order_frames_are_rejected() {
        let mut frames = vec![frame(2, "c"), frame(1, "b")];
        let err = attach_locals(&mut frames, &[None, None, None]).unwrap_err();
        assert!(matches!(
            err,
            ReportError::LocalsOutOfOrder { index: 1, steps: 3 }
        ));
    }
}
