//! Integration tests for sinks and the tracing bridge.

use logging::{
    CaptureLayer, EventSink, Level, LineMode, LogConfig, LogSink, TracingSink, WriterSink,
    drain_events, init,
};
use tracing_subscriber::layer::SubscriberExt;

#[test]
fn writer_sink_level_prefix() {
    let mut sink = WriterSink::new(Vec::new()).with_level_prefix(true);
    sink.emit(Level::Warning, "careful").expect("write succeeds");
    sink.emit(Level::Info, "done").expect("write succeeds");

    let output = String::from_utf8(sink.into_inner()).expect("utf-8");
    assert_eq!(output, "WARNING | careful\nINFO | done\n");
}

#[test]
fn writer_sink_line_mode_can_change() {
    let mut sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
    sink.emit(Level::Info, "a").expect("write succeeds");
    sink.set_line_mode(LineMode::WithNewline);
    sink.emit(Level::Info, "b").expect("write succeeds");
    assert_eq!(sink.line_mode(), LineMode::WithNewline);
    assert_eq!(sink.get_ref().as_slice(), b"ab\n");
}

#[test]
fn dyn_sinks_are_interchangeable() {
    drain_events();
    let mut sinks: Vec<Box<dyn LogSink>> =
        vec![Box::new(EventSink), Box::new(WriterSink::new(Vec::new()))];
    for sink in &mut sinks {
        sink.emit(Level::Debug, "fan out").expect("emit succeeds");
    }
    assert_eq!(drain_events().len(), 1);
}

#[test]
fn tracing_sink_respects_thread_threshold() {
    init(LogConfig::default().with_level(Level::Error));
    drain_events();

    let subscriber = tracing_subscriber::registry().with(CaptureLayer);
    tracing::subscriber::with_default(subscriber, || {
        let mut sink = TracingSink;
        sink.emit(Level::Info, "quiet").expect("emit succeeds");
        sink.emit(Level::Error, "loud").expect("emit succeeds");
    });

    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "loud");
}

#[cfg(feature = "serde")]
#[test]
fn config_serializes() {
    let config = LogConfig::from_vars(Some("warning"), Some("1"));
    let json = serde_json::to_string(&config).expect("serialize");
    let back: LogConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
}
