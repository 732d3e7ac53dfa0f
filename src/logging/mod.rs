//! Logging Module
//!
//! Sink abstraction for pause lines plus an `env_logger` setup for hosts
//! that want the lines on stderr.
//!
//! # Output Format
//!
//! ```text
//! [2026-10-18T10:00:00.123][gc] Pause Young (Allocation Failure) 100M->60M(512M) majflt(10->12) 4.256ms
//! [2026-10-18T10:00:00.123][gc::cpu] User=0.01s Sys=0.00s Real=0.00s
//! [2026-10-18T10:00:00.124][gc::cpu][WARN] TraceCPUTime: ...
//! ```

pub mod sink;

pub use sink::{LogCrateSink, LogSink, TARGET_GC, TARGET_GC_CPU};

use chrono::Local;

/// Timestamp layout used as the line decoration.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Configures `env_logger` with the pause line formatting.
///
/// `RUST_LOG` overrides the default filter. Calling this more than once
/// is harmless; later calls leave the first logger in place.
pub fn init(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            use std::io::Write;

            let stamp = Local::now().format(TIMESTAMP_FORMAT);
            match record.level() {
                log::Level::Warn | log::Level::Error => writeln!(
                    buf,
                    "[{}][{}][{}] {}",
                    stamp,
                    record.target(),
                    record.level(),
                    record.args()
                ),
                _ => writeln!(buf, "[{}][{}] {}", stamp, record.target(), record.args()),
            }
        })
        .try_init();
}
