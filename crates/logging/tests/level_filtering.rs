//! Integration tests for level parsing and threshold filtering.
//!
//! These tests verify that a configuration built from the environment variable
//! values rejects messages below its threshold and accepts the rest.

use logging::{Level, LogConfig, drain_events, emit, enabled, init, verbose};

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn names_are_case_insensitive() {
    for (input, expected) in [
        ("debug", Level::Debug),
        ("Debug", Level::Debug),
        ("WARNING", Level::Warning),
        ("warn", Level::Warning),
        ("critical", Level::Critical),
    ] {
        assert_eq!(input.parse::<Level>(), Ok(expected), "input {input:?}");
    }
}

#[test]
fn numeric_values_are_accepted() {
    assert_eq!("11".parse::<Level>(), Ok(Level::Info));
    assert_eq!("0".parse::<Level>(), Ok(Level::NotSet));
    assert!("4".parse::<Level>().is_err());
}

#[test]
fn unknown_names_report_the_input() {
    let err = "loud".parse::<Level>().unwrap_err();
    assert_eq!(err.input(), "loud");
    assert_eq!(err.to_string(), "unknown log level: \"loud\"");
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn threshold_rejects_lower_levels() {
    let config = LogConfig::from_vars(Some("NOTICE"), None);
    let allowed: Vec<Level> = Level::ALL
        .into_iter()
        .filter(|level| config.allows(*level))
        .collect();
    assert_eq!(
        allowed,
        vec![Level::Notice, Level::Warning, Level::Error, Level::Critical]
    );
}

#[test]
fn unknown_level_name_allows_everything() {
    let config = LogConfig::from_vars(Some("chatty"), None);
    assert_eq!(config.level, Level::NotSet);
    assert!(config.allows(Level::Trace));
}

#[test]
fn none_silences_every_level() {
    let config = LogConfig::from_vars(Some("none"), Some("true"));
    assert!(Level::ALL.into_iter().all(|level| !config.allows(level)));
}

#[test]
fn thread_state_follows_init() {
    init(LogConfig::from_vars(Some("error"), Some("yes")));
    assert!(enabled(Level::Critical));
    assert!(!enabled(Level::Warning));
    assert!(verbose());

    drain_events();
    emit(Level::Error, "recorded".to_owned());
    let events = drain_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].message, "recorded");
}

#[test]
fn verbose_requires_flag() {
    init(LogConfig::from_vars(None, None));
    assert!(!verbose());
    init(LogConfig::from_vars(None, Some("on")));
    assert!(verbose());
}
