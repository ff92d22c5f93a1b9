//! A debugging session through the facade: values, logs, call traces and
//! reports together.

use std::fs;

use debugkit::logging::{CaptureLayer, EventSink, drain_events, init};
use debugkit::prelude::*;
use debugkit::report::{ErrorTrace, FrameRecord, Locals};
use tracing_subscriber::layer::SubscriberExt;

fn plain() -> FormatOptions {
    FormatOptions::new().emphasis(Emphasis::plain())
}

#[test]
fn report_reads_source_lines_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = dir.path().join("handler.rs");
    fs::write(
        &file,
        "fn handle(req: Request) -> Result<(), Error> {\n    let body = decode(&req.body)?;\n    Ok(())\n}\n",
    )
    .expect("write source");
    let file = file.display().to_string();

    let mut trace = ErrorTrace::new(vec![FrameRecord::new(0, file.as_str(), 2, "handle")]);
    trace.set_locals(0, Locals::new().with("len", &0_usize));
    let report = ReportBuilder::new()
        .error(CapturedError::from_parts("DecodeError", ["unexpected end of input"]).with_trace(trace))
        .ambient_stack(Vec::new())
        .color(ColorMode::Never)
        .terminal_width(12)
        .build();

    assert_eq!(
        report.summary(&[]),
        "DecodeError, File \"".to_owned()
            + &file
            + "\", line 2 in handle()\nException args:\n\tunexpected end of input\n\
               Responsible code:\n\tlet body = decode(&req.body)?;"
    );
    let full = report.full(&[&"request 42"], Some(0));
    assert!(full.starts_with("\n------------\n\n"));
    assert!(full.ends_with("\n------------\n"));
    assert!(full.contains("\nrequest 42\n"));
    assert!(full.contains("Locals:\n\tlen: 0 (usize)\n"));
}

#[test]
fn logger_and_formatter_agree() {
    let mut logger = Logger::new(EventSink, LogConfig::default()).emphasis(Emphasis::plain());
    drain_events();
    let ids = vec![3, 1, 2];
    logger.info(&args!["ids:", ids]);
    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, format!("ids: {}", pformat(&ids, &plain())));
}

#[test]
fn failed_report_construction_is_observable() {
    init(LogConfig::default().with_level(Level::Warning));
    drain_events();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer);
    let report = tracing::subscriber::with_default(subscriber, || {
        ReportBuilder::new()
            .error(CapturedError::from_parts("Timeout", ["30s"]))
            .irrelevant_pattern("src/[")
            .color(ColorMode::Never)
            .build()
    });

    assert_eq!(report.kind(), Some("Timeout"));
    assert!(report.one_liner(&[]).starts_with(
        "Timeout: ExcReport construction ITSELF failed, accidental error (caught and ok):"
    ));
    assert!(
        drain_events()
            .iter()
            .any(|event| event.message.contains("report construction failed"))
    );
}

#[test]
fn call_tracing_round_trip() {
    let mut sink = WriterSink::new(Vec::new());
    let options = InvestigateOptions::new().format_options(plain()).types(true);
    let (base, exp) = (2_u32, 10_u32);
    let value = log_in_out(&mut sink, &call_sig!(pow(base, exp)), &options, || base.pow(exp));
    assert_eq!(value, 1024);
    assert_eq!(
        String::from_utf8(sink.into_inner()).expect("utf-8 output"),
        "pow(base=2, exp=10) → 1024 (u32)\n"
    );
}
