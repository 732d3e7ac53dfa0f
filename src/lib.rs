//! pausetrace - Pause Timing and Metrics Reporting
//!
//! Measures stop-the-world pauses (garbage collection pauses, or any other
//! bounded operation) and reports each one as a single log line, with an
//! optional CPU-time summary forwarded to a tracer.
//!
//! # Architecture
//!
//! The library is organized into four main modules:
//!
//! - [`trace`]: Event timer, CPU-time sampler and scoped pause guard
//! - [`sources`]: Clocks, heap accessor and kernel statistics interfaces
//! - [`logging`]: Log sink abstraction and `env_logger` setup
//! - [`config`]: Trace settings loaded from YAML or JSON
//!
//! # Example
//!
//! ```rust,no_run
//! use pausetrace::{trace_pause, PauseCause, TraceConfig, TraceContext};
//!
//! pausetrace::logging::init(false);
//! let ctx = TraceContext::from_config(TraceConfig::default());
//!
//! let reclaimed = trace_pause(&ctx, "Pause Young", PauseCause::AllocationFailure, None, || {
//!     // ... stop-the-world work ...
//!     128
//! });
//! assert_eq!(reclaimed, 128);
//! ```

pub mod config;
pub mod logging;
pub mod sources;
pub mod trace;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{load_config, ConfigError, FaultSource, TraceConfig};
pub use sources::{SourceError, Ticks};
pub use trace::{
    trace_pause, CpuTimeReport, CpuTimeSampler, EventRecord, EventTimer, PauseCause, ScopedPause,
    TraceContext, Tracer,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_version_format() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
        for part in parts {
            assert!(part.parse::<u32>().is_ok(), "Version components should be numeric");
        }
    }

    #[test]
    fn test_reexports_compose() {
        let ctx = TraceContext::from_config(TraceConfig {
            log_cpu_time: Some(false),
            ..TraceConfig::default()
        });
        let record = EventTimer::new(&ctx, "Pause Young", PauseCause::NoCause)
            .start(Ticks::from_nanos(0))
            .end(Ticks::from_nanos(1_000_000));
        assert!(record.line.ends_with(" 1.000ms"));
    }
}
