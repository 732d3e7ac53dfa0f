//! Scoped Pauses
//!
//! Brackets one pause with both an [`EventTimer`] and a
//! [`CpuTimeSampler`]. The guard ends both when it goes out of scope; the
//! timing line is always written before the CPU-time line.

use super::cause::PauseCause;
use super::context::TraceContext;
use super::cpu_time::CpuTimeSampler;
use super::timer::{EventRecord, EventTimer, StartedEvent};
use super::tracer::{CpuTimeReport, Tracer};

/// Everything reported for a finished scoped pause.
#[derive(Debug, Clone, PartialEq)]
pub struct PauseSummary {
    pub event: EventRecord,
    pub cpu: Option<CpuTimeReport>,
}

/// Guard that ends its pause on drop.
#[derive(Debug)]
pub struct ScopedPause<'a> {
    event: Option<StartedEvent<'a>>,
    sampler: Option<CpuTimeSampler<'a>>,
}

impl<'a> ScopedPause<'a> {
    /// Starts a pause now.
    pub fn start(
        ctx: &'a TraceContext,
        title: impl Into<String>,
        cause: PauseCause,
        tracer: Option<&'a dyn Tracer>,
    ) -> Self {
        let sampler = CpuTimeSampler::new(ctx, tracer);
        let event = EventTimer::new(ctx, title, cause).start_now();
        Self {
            event: Some(event),
            sampler: Some(sampler),
        }
    }

    /// Ends the pause now and returns what was reported.
    pub fn finish(mut self) -> Option<PauseSummary> {
        self.close()
    }

    /// Ends the timer, then the sampler. Only the first call reports.
    fn close(&mut self) -> Option<PauseSummary> {
        let event = self.event.take()?.end_now();
        let cpu = self.sampler.take().and_then(CpuTimeSampler::finish);
        Some(PauseSummary { event, cpu })
    }
}

impl Drop for ScopedPause<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

impl TraceContext {
    /// Starts a scoped pause against this context.
    pub fn pause<'a>(
        &'a self,
        title: impl Into<String>,
        cause: PauseCause,
        tracer: Option<&'a dyn Tracer>,
    ) -> ScopedPause<'a> {
        ScopedPause::start(self, title, cause, tracer)
    }
}

/// Runs `work` inside a scoped pause and returns its result.
pub fn trace_pause<'a, T>(
    ctx: &'a TraceContext,
    title: impl Into<String>,
    cause: PauseCause,
    tracer: Option<&'a dyn Tracer>,
    work: impl FnOnce() -> T,
) -> T {
    let _pause = ScopedPause::start(ctx, title, cause, tracer);
    work()
}
