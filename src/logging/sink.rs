//! Log Sink
//!
//! Where formatted pause lines go. The default sink forwards to the `log`
//! facade so lines land in whatever logger the host installed.

use log::Level;

/// Target for pause timing lines.
pub const TARGET_GC: &str = "gc";

/// Target for CPU-time lines and their warnings.
pub const TARGET_GC_CPU: &str = "gc::cpu";

/// Accepts pre-formatted log lines.
///
/// Each call to [`write`](LogSink::write) is one complete logical line.
pub trait LogSink: Send + Sync {
    /// Whether lines at `level` for `target` would be emitted.
    fn is_enabled(&self, level: Level, target: &str) -> bool;

    /// Emits one line.
    fn write(&self, level: Level, target: &str, line: &str);
}

/// Sink that forwards to the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn is_enabled(&self, level: Level, target: &str) -> bool {
        log::log_enabled!(target: target, level)
    }

    fn write(&self, level: Level, target: &str, line: &str) {
        log::log!(target: target, level, "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_crate_sink_without_logger() {
        // With no logger installed nothing is enabled and writes are dropped.
        let sink = LogCrateSink;
        sink.write(Level::Info, TARGET_GC, "Pause Young 0.100ms");
        let _ = sink.is_enabled(Level::Info, TARGET_GC_CPU);
    }

    #[test]
    fn test_targets_nest() {
        assert!(TARGET_GC_CPU.starts_with(TARGET_GC));
    }
}
