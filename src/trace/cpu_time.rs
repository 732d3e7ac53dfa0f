//! CPU Time Sampler
//!
//! Measures user, system and real time across a scope. Creating the
//! sampler captures the baseline; [`finish`](CpuTimeSampler::finish) or
//! dropping it takes the closing reading and reports, exactly once, on
//! every exit path including early returns and unwinding.

use log::Level;

use super::context::TraceContext;
use super::tracer::{CpuTimeReport, Tracer};
use crate::logging::TARGET_GC_CPU;
use crate::sources::{CpuTimes, SourceError};

/// Lifecycle of a sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplerState {
    /// Neither logging nor a tracer wanted CPU time, or the first read failed.
    Inactive,
    /// Baseline captured.
    Active(CpuTimes),
    /// Deltas were logged and forwarded.
    Reported(CpuTimeReport),
    /// The closing read failed; only a warning was written.
    Failed,
}

/// Scoped CPU-time measurement.
pub struct CpuTimeSampler<'a> {
    ctx: &'a TraceContext,
    tracer: Option<&'a dyn Tracer>,
    state: SamplerState,
}

impl<'a> CpuTimeSampler<'a> {
    /// Creates a sampler and captures the baseline if it is active.
    ///
    /// The sampler is active when CPU-time logging is enabled or `tracer`
    /// asks for CPU-time events. Activity is decided here and never
    /// re-evaluated.
    pub fn new(ctx: &'a TraceContext, tracer: Option<&'a dyn Tracer>) -> Self {
        let active = ctx.cpu_logging_enabled()
            || tracer.map_or(false, |tracer| tracer.should_report_cpu_time_event());

        let state = if active {
            match ctx.cpu.times() {
                Ok(start) => SamplerState::Active(start),
                Err(err) => {
                    warn_invalid(ctx, &err);
                    SamplerState::Inactive
                }
            }
        } else {
            SamplerState::Inactive
        };

        Self { ctx, tracer, state }
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SamplerState::Active(_))
    }

    /// Ends the measurement now and returns the report, if one was made.
    pub fn finish(mut self) -> Option<CpuTimeReport> {
        self.close();
        match self.state {
            SamplerState::Reported(report) => Some(report),
            _ => None,
        }
    }

    /// Takes the closing reading if still active. Later calls do nothing.
    fn close(&mut self) {
        let SamplerState::Active(start) = self.state else {
            return;
        };

        self.state = match self.ctx.cpu.times() {
            Ok(end) => {
                let delta = end.since(&start);
                let report = CpuTimeReport {
                    user: delta.user,
                    system: delta.system,
                    real: delta.real,
                };
                self.ctx
                    .sink
                    .write(Level::Info, TARGET_GC_CPU, &report.line());
                if let Some(tracer) = self.tracer {
                    tracer.report_cpu_time_event(report.user, report.system, report.real);
                }
                SamplerState::Reported(report)
            }
            Err(err) => {
                warn_invalid(self.ctx, &err);
                SamplerState::Failed
            }
        };
    }
}

impl Drop for CpuTimeSampler<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for CpuTimeSampler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuTimeSampler")
            .field("state", &self.state)
            .field("has_tracer", &self.tracer.is_some())
            .finish()
    }
}

fn warn_invalid(ctx: &TraceContext, err: &SourceError) {
    ctx.sink.write(
        Level::Warn,
        TARGET_GC_CPU,
        &format!("TraceCPUTime: CPU time source returned invalid result: {}", err),
    );
}
