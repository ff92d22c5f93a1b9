//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the thread-local logging state.
//!
//! Two directions are covered:
//!
//! - [`TracingSink`] forwards rendered messages into `tracing` so they reach
//!   whatever subscriber the host program installed.
//! - [`CaptureLayer`] is a tracing-subscriber layer that records events passing
//!   the current thread's [`LogConfig`] into the thread-local event buffer.
//!   The report builder emits its own diagnostics through `tracing`, so tests
//!   can observe them with [`drain_events`](crate::drain_events).
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LogConfig, init_tracing};
//!
//! init_tracing(&LogConfig::from_env())?;
//! tracing::warn!("reported through the bridge");
//! ```

use std::io;

use super::config::LogConfig;
use super::levels::Level;
use super::sink::LogSink;
use super::thread_local::{emit, enabled};
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

/// Target used for messages forwarded by [`TracingSink`].
const SINK_TARGET: &str = "debugkit";

/// Forwards messages to the `tracing` macros matching their level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&mut self, level: Level, message: &str) -> io::Result<()> {
        match level.to_tracing() {
            tracing::Level::ERROR => tracing::error!(target: SINK_TARGET, "{message}"),
            tracing::Level::WARN => tracing::warn!(target: SINK_TARGET, "{message}"),
            tracing::Level::INFO => tracing::info!(target: SINK_TARGET, "{message}"),
            tracing::Level::DEBUG => tracing::debug!(target: SINK_TARGET, "{message}"),
            tracing::Level::TRACE => tracing::trace!(target: SINK_TARGET, "{message}"),
        }
        Ok(())
    }
}

/// A tracing layer that records events into the thread-local event buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct CaptureLayer;

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let level = Level::from_tracing(*event.metadata().level());
        if !enabled(level) {
            return;
        }
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            emit(level, message);
        }
    }
}

/// Visitor to extract the message from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Returns the `EnvFilter` directive equivalent to `config`.
fn filter_directive(config: &LogConfig) -> &'static str {
    if config.disabled {
        return "off";
    }
    match config.level.to_tracing() {
        tracing::Level::TRACE => "trace",
        tracing::Level::DEBUG => "debug",
        tracing::Level::INFO => "info",
        tracing::Level::WARN => "warn",
        tracing::Level::ERROR => "error",
    }
}

/// Installs a global subscriber honouring `config`.
///
/// The subscriber prints to stderr through `tracing-subscriber`'s formatter and
/// also feeds [`CaptureLayer`]. The calling thread's configuration is set to
/// `config` as well. Fails when a global subscriber is already installed.
pub fn init_tracing(config: &LogConfig) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directive(config)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(CaptureLayer)
        .try_init()
}
