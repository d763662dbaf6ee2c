//! Ambient logging: a `tracing` subscriber that writes through the system
//! call layer itself, so freestanding programs get structured events with
//! nothing underneath them but the kernel.

use crate::{errors::from_ret, kernel, types::Word};
use alloc::{format, string::String};
use tracing::{
    field::{Field, Visit},
    span::{Attributes, Id, Record},
    Event, Level, Metadata, Subscriber,
};

/// `write` call number and standard error descriptor. On targets where
/// the native kernel is the no-op kernel, the write quietly goes nowhere.
const SYS_WRITE: Word = 1;
const STDERR: Word = 2;

/// A [Subscriber] that renders each event to one line and hands it to the
/// kernel's `write` on standard error. Events more verbose than the
/// configured level are dropped; spans are accepted but not tracked.
///
/// Rendering uses `alloc`, so the embedding application must install a
/// global allocator before the first event; this layer itself still owns
/// no heap.
#[derive(Debug, Clone)]
pub struct StderrSubscriber {
    min_level: Level,
}

impl StderrSubscriber {
    /// Create a new [StderrSubscriber] with the given minimum level.
    pub const fn new(min_level: Level) -> Self {
        Self { min_level }
    }
}

impl Subscriber for StderrSubscriber {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        // Comparisons for the [Level] type are inverted. See the [Level]
        // documentation for more information.
        *metadata.level() <= self.min_level
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let metadata = event.metadata();
        if *metadata.level() > self.min_level {
            return;
        }

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let line = format!("[{}] {}:{}\n", metadata.level(), metadata.target(), visitor.line);
        write_stderr(line.as_bytes());
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Collects event fields into a ` key=value` line fragment; the
/// conventional `message` field is rendered bare.
#[derive(Default)]
struct LineVisitor {
    line: String,
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn core::fmt::Debug) {
        if field.name() == "message" {
            self.line.push_str(&format!(" {:?}", value));
        } else {
            self.line.push_str(&format!(" {}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.line.push(' ');
            self.line.push_str(value);
        } else {
            self.line.push_str(&format!(" {}={}", field.name(), value));
        }
    }
}

/// Hands the whole buffer to `write` on standard error, resuming short
/// writes. Failures are swallowed: there is nowhere left to report them.
fn write_stderr(bytes: &[u8]) {
    let mut written = 0;
    while written < bytes.len() {
        let rest = &bytes[written..];
        let ret =
            unsafe { kernel::syscall3(SYS_WRITE, STDERR, rest.as_ptr() as Word, rest.len()) };
        match from_ret(ret) {
            // A zero write is the no-op kernel; bail instead of spinning.
            Ok(0) | Err(_) => break,
            Ok(n) => written += n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_reach_standard_error_without_panicking() {
        let subscriber = StderrSubscriber::new(Level::DEBUG);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "talus", answer = 42, "subscriber smoke test");
            tracing::trace!(target: "talus", "filtered out below the minimum");
        });
    }

    #[test]
    fn test_short_writes_resume() {
        write_stderr(b"");
        write_stderr(b"talus tracing self-test\n");
    }
}
