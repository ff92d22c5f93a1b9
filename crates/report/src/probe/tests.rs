use super::*;

const SAMPLE: &str = "\
   0: std::backtrace_rs::backtrace::libunwind::trace
             at /rustc/90b35a6239c3d8bdabc530a6a0816f7ff89a0aaf/library/std/src/../../backtrace/src/backtrace/libunwind.rs:116:5
   1: std::backtrace::Backtrace::create
             at /rustc/90b35a6239c3d8bdabc530a6a0816f7ff89a0aaf/library/std/src/backtrace.rs:331:13
   2: <report::probe::BacktraceProbe as report::probe::StackProbe>::capture
             at ./crates/report/src/probe.rs:128:20
   3: report::builder::ReportBuilder::build::h0123456789abcdef
             at ./crates/report/src/builder.rs:200:9
   4: app::handlers::load_config
             at ./src/handlers.rs:42:17
   5: app::main
             at ./src/main.rs:7:5
   6: __libc_start_main
   7: _start
";

#[test]
fn parses_frames_innermost_first() {
    let frames = parse_backtrace(SAMPLE);
    assert_eq!(frames.len(), 8);
    assert_eq!(frames[0].function, "std::backtrace_rs::backtrace::libunwind::trace");
    assert_eq!(frames[4].file.as_deref(), Some("./src/handlers.rs"));
    assert_eq!(frames[4].line, 42);
    assert_eq!(frames[6].file, None);
}

#[test]
fn strips_symbol_hashes() {
    let frames = parse_backtrace(SAMPLE);
    assert_eq!(frames[3].function, "report::builder::ReportBuilder::build");
}

#[test]
fn finish_drops_internal_frames_and_reverses() {
    let probe = BacktraceProbe::new();
    let frames = probe.finish(parse_backtrace(SAMPLE));
    let functions: Vec<&str> = frames.iter().map(|f| f.function.as_str()).collect();
    assert_eq!(
        functions,
        ["_start", "__libc_start_main", "app::main", "app::handlers::load_config"]
    );
    let indices: Vec<usize> = frames.iter().map(|f| f.index).collect();
    assert_eq!(indices, [0, 1, 2, 3]);
}

#[test]
fn skip_and_custom_prefixes() {
    let probe = BacktraceProbe::new().skip(1);
    let frames = probe.finish(parse_backtrace(SAMPLE));
    assert_eq!(frames.last().map(|f| f.function.as_str()), Some("app::main"));

    let probe = BacktraceProbe::new().internal_prefix("app::handlers");
    let frames = probe.finish(parse_backtrace(SAMPLE));
    assert_eq!(frames.last().map(|f| f.function.as_str()), Some("app::main"));
}

#[test]
fn empty_text_parses_to_nothing() {
    assert!(parse_backtrace("").is_empty());
    assert!(parse_backtrace("disabled backtrace").is_empty());
}

#[test]
fn fixed_probe_returns_its_frames() {
    let frames = vec![FrameRecord::new(0, "src/lib.rs", 3, "entry")];
    let probe = FixedProbe(frames.clone());
    assert_eq!(probe.capture().expect("fixed"), frames);
    let boxed: Box<dyn StackProbe> = Box::new(probe);
    assert_eq!(boxed.capture().expect("fixed").len(), 1);
}

const CATCH_UNWIND_SAMPLE: &str = "\
   0: std::backtrace::Backtrace::force_capture
             at /rustc/90b35a6239c3d8bdabc530a6a0816f7ff89a0aaf/library/std/src/backtrace.rs:312:9
   1: <report::probe::BacktraceProbe as report::probe::StackProbe>::capture
             at ./src/probe.rs:132:20
   2: report::builder::ReportBuilder::capture_ambient
             at ./src/builder.rs:188:26
   3: report::builder::ReportBuilder::assemble_or_recover::{{closure}}
             at ./src/builder.rs:168:68
   4: std::panicking::try::do_call
             at /rustc/90b35a6239c3d8bdabc530a6a0816f7ff89a0aaf/library/std/src/panicking.rs:557:40
   5: __rust_try
   6: std::panic::catch_unwind
             at /rustc/90b35a6239c3d8bdabc530a6a0816f7ff89a0aaf/library/std/src/panic.rs:358:14
   7: report::builder::ReportBuilder::assemble_or_recover
             at ./src/builder.rs:168:23
   8: report::builder::ReportBuilder::build
             at ./src/builder.rs:158:20
   9: worker::handle_request
             at ./src/worker.rs:21:9
  10: worker::main
             at ./src/worker.rs:4:5
";

#[test]
fn builder_frames_behind_catch_unwind_are_dropped() {
    let frames = BacktraceProbe::new().finish(parse_backtrace(CATCH_UNWIND_SAMPLE));
    let functions: Vec<&str> = frames.iter().map(|f| f.function.as_str()).collect();
    assert_eq!(functions, ["worker::main", "worker::handle_request"]);
    assert_eq!(frames[1].file.as_deref(), Some("./src/worker.rs"));
}
