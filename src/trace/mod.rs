//! Pause Tracing Module
//!
//! The two halves of a pause report and the guard that composes them.
//!
//! # Components
//!
//! - [`EventTimer`]: Duration, heap and major fault line
//! - [`CpuTimeSampler`]: User/system/real CPU time line and tracer forward
//! - [`ScopedPause`]: Guard running both around one interval
//! - [`TraceContext`]: Shared sink and measurement sources

pub mod cause;
pub mod context;
pub mod cpu_time;
pub mod scope;
pub mod timer;
pub mod tracer;

pub use cause::PauseCause;
pub use context::TraceContext;
pub use cpu_time::{CpuTimeSampler, SamplerState};
pub use scope::{trace_pause, PauseSummary, ScopedPause};
pub use timer::{EventRecord, EventTimer, HeapDelta, StartedEvent, FAULTS_UNKNOWN, FAULTS_UNSET};
pub use tracer::{CpuTimeReport, Tracer};
