//! Properties of stack filtering and reconciliation.

use proptest::prelude::*;
use report::{FrameFilter, FrameRecord, Locals, attach_locals, overlap_index, reconcile};

const FILES: &[&str] = &[
    "src/main.rs",
    "src/app.rs",
    "src/io.rs",
    "/rustc/abc/library/core/src/ops.rs",
    "/home/dev/.cargo/registry/src/serde-1.0/src/de.rs",
    "",
];

fn frames(files: &[usize]) -> Vec<FrameRecord> {
    files
        .iter()
        .enumerate()
        .map(|(index, &file)| {
            let line = i64::try_from(index).unwrap_or(0) + 1;
            FrameRecord::new(index, FILES[file], line, format!("f{index}"))
        })
        .collect()
}

#[test]
fn splice_replaces_tail_from_shared_file() {
    let a = FrameRecord::new(0, "a.rs", 1, "a");
    let b = FrameRecord::new(1, "b.rs", 2, "b");
    let c = FrameRecord::new(2, "c.rs", 3, "c");
    let b2 = FrameRecord::new(0, "b.rs", 7, "b");
    let d = FrameRecord::new(1, "d.rs", 4, "d");
    let merged = reconcile(vec![a.clone(), b, c], vec![b2.clone(), d.clone()]);
    assert_eq!(merged, vec![a, b2, d]);
}

proptest! {
    #[test]
    fn filtered_frames_never_survive(files in prop::collection::vec(0..FILES.len(), 0..16)) {
        let filter = FrameFilter::with_defaults();
        let kept = filter.retain(frames(&files));
        for frame in &kept {
            prop_assert!(!filter.is_irrelevant(frame));
        }
        let indices: Vec<usize> = kept.iter().map(|f| f.index).collect();
        let mut sorted = indices.clone();
        sorted.sort_unstable();
        prop_assert_eq!(indices, sorted);
    }

    #[test]
    fn reconciled_stack_ends_with_error_trace(
        ambient in prop::collection::vec(0..3usize, 0..8),
        trace in prop::collection::vec(0..3usize, 0..8),
    ) {
        let ambient = frames(&ambient);
        let trace = frames(&trace);
        let merged = reconcile(ambient.clone(), trace.clone());
        prop_assert!(merged.ends_with(&trace));
        let prefix = overlap_index(&ambient, &trace).unwrap_or(ambient.len());
        prop_assert_eq!(&merged[..prefix], &ambient[..prefix]);
        prop_assert_eq!(merged.len(), prefix + trace.len());
    }

    #[test]
    fn locals_land_on_their_own_frame(files in prop::collection::vec(0..FILES.len(), 1..16)) {
        let all = frames(&files);
        let chain: Vec<Option<Locals>> = all
            .iter()
            .map(|f| Some(Locals::new().with("index", &f.index)))
            .collect();
        let mut kept = FrameFilter::with_defaults().retain(all);
        attach_locals(&mut kept, &chain).expect("filtered frames stay ordered");
        for frame in &kept {
            let recorded = frame.locals.as_ref().and_then(|l| l.get("index"));
            prop_assert_eq!(
                recorded.map(|l| l.value.repr()),
                Some(frame.index.to_string())
            );
        }
    }
}
