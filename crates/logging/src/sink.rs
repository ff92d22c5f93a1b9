//! crates/logging/src/sink.rs
//! Destinations for rendered messages.

use std::fmt;
use std::io::{self, Write};

use crate::levels::Level;
use crate::line_mode::LineMode;
use crate::thread_local;

/// Accepts a rendered message at a given severity.
///
/// Sinks never filter; level thresholds are applied by the caller against a
/// [`LogConfig`](crate::LogConfig).
pub trait LogSink {
    /// Emits `message` at `level`.
    fn emit(&mut self, level: Level, message: &str) -> io::Result<()>;
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn emit(&mut self, level: Level, message: &str) -> io::Result<()> {
        (**self).emit(level, message)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn emit(&mut self, level: Level, message: &str) -> io::Result<()> {
        (**self).emit(level, message)
    }
}

/// Streams messages into an [`io::Write`] target.
///
/// # Examples
///
/// ```
/// use logging::{Level, LogSink, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new()).with_level_prefix(true);
/// sink.emit(Level::Error, "boom")?;
/// assert_eq!(String::from_utf8(sink.into_inner()).unwrap(), "ERROR | boom\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct WriterSink<W> {
    writer: W,
    line_mode: LineMode,
    level_prefix: bool,
}

impl<W> WriterSink<W> {
    /// Creates a sink that appends a newline after each message.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self::with_line_mode(writer, LineMode::WithNewline)
    }

    /// Creates a sink with the provided [`LineMode`].
    #[must_use]
    pub fn with_line_mode(writer: W, line_mode: LineMode) -> Self {
        Self {
            writer,
            line_mode,
            level_prefix: false,
        }
    }

    /// Prefixes each message with its level name when `enabled`.
    #[must_use]
    pub fn with_level_prefix(mut self, enabled: bool) -> Self {
        self.level_prefix = enabled;
        self
    }

    /// Returns the current [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Updates the [`LineMode`] used for subsequent writes.
    pub fn set_line_mode(&mut self, line_mode: LineMode) {
        self.line_mode = line_mode;
    }

    /// Borrows the underlying writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    /// Sink writing to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl WriterSink<io::Stderr> {
    /// Sink writing to standard error.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> WriterSink<W> {
    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn emit(&mut self, level: Level, message: &str) -> io::Result<()> {
        if self.level_prefix {
            write!(self.writer, "{level} | ")?;
        }
        self.writer.write_all(message.as_bytes())?;
        if self.line_mode.append_newline() {
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl<W> fmt::Debug for WriterSink<W>
where
    W: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("writer", &self.writer)
            .field("line_mode", &self.line_mode)
            .field("level_prefix", &self.level_prefix)
            .finish()
    }
}

/// Records messages into the current thread's event buffer.
///
/// Pair with [`drain_events`](crate::drain_events) to inspect output in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventSink;

impl LogSink for EventSink {
    fn emit(&mut self, level: Level, message: &str) -> io::Result<()> {
        thread_local::emit(level, message.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_sink_appends_newlines_by_default() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit(Level::Info, "first").expect("write succeeds");
        sink.emit(Level::Warning, "second").expect("write succeeds");

        let output = String::from_utf8(sink.into_inner()).expect("utf-8");
        assert_eq!(output, "first\nsecond\n");
    }

    #[test]
    fn writer_sink_without_newline() {
        let mut sink = WriterSink::with_line_mode(Vec::new(), LineMode::WithoutNewline);
        sink.emit(Level::Info, "ready").expect("write succeeds");
        assert_eq!(sink.into_inner(), b"ready".to_vec());
    }

    #[test]
    fn boxed_and_borrowed_sinks_forward() {
        let mut inner = WriterSink::new(Vec::new());
        {
            let mut borrowed: &mut WriterSink<Vec<u8>> = &mut inner;
            borrowed.emit(Level::Debug, "via ref").expect("write succeeds");
        }
        let mut boxed: Box<dyn LogSink> = Box::new(inner);
        boxed.emit(Level::Debug, "via box").expect("write succeeds");
    }

    #[test]
    fn event_sink_records_on_current_thread() {
        crate::drain_events();
        EventSink.emit(Level::Notice, "captured").expect("emit succeeds");
        let events = crate::drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::Notice);
        assert_eq!(events[0].message, "captured");
    }
}
