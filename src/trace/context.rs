//! Trace Context
//!
//! Bundles the collaborators a pause is measured against: the log sink,
//! the heap accessor and the kernel statistics sources. One context is
//! built per process (or per test) and shared by reference across pauses.

use crate::config::{FaultSource, TraceConfig};
use crate::logging::{LogCrateSink, LogSink, TARGET_GC_CPU};
use crate::sources::{
    CpuTimeSource, FaultCounter, FaultyPageIndexSyscall, HeapUsage, NoFaultCounter, NoPageIndex,
    PageIndexProbe, ProcessCpuTimes, ProcessMemory, RusageFaultCounter, SwapStatsFaultCounter,
};

/// Collaborators and settings shared by every pause.
pub struct TraceContext {
    pub(crate) config: TraceConfig,
    pub(crate) sink: Box<dyn LogSink>,
    pub(crate) heap: Box<dyn HeapUsage>,
    pub(crate) faults: Box<dyn FaultCounter>,
    pub(crate) page_index: Box<dyn PageIndexProbe>,
    pub(crate) cpu: Box<dyn CpuTimeSource>,
}

impl TraceContext {
    /// Creates a context with OS-backed sources chosen by `config`.
    pub fn from_config(config: TraceConfig) -> Self {
        let faults: Box<dyn FaultCounter> = match config.fault_source {
            FaultSource::SwapStats => Box::new(SwapStatsFaultCounter),
            FaultSource::Rusage => Box::new(RusageFaultCounter),
            FaultSource::None => Box::new(NoFaultCounter),
        };
        let page_index: Box<dyn PageIndexProbe> = if config.page_index {
            Box::new(FaultyPageIndexSyscall)
        } else {
            Box::new(NoPageIndex)
        };

        Self {
            config,
            sink: Box::new(LogCrateSink),
            heap: Box::new(ProcessMemory::new()),
            faults,
            page_index,
            cpu: Box::new(ProcessCpuTimes),
        }
    }

    /// Replaces the log sink.
    pub fn with_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Replaces the heap accessor.
    pub fn with_heap(mut self, heap: impl HeapUsage + 'static) -> Self {
        self.heap = Box::new(heap);
        self
    }

    /// Replaces the major fault counter.
    pub fn with_fault_counter(mut self, faults: impl FaultCounter + 'static) -> Self {
        self.faults = Box::new(faults);
        self
    }

    /// Replaces the page index probe.
    pub fn with_page_index(mut self, probe: impl PageIndexProbe + 'static) -> Self {
        self.page_index = Box::new(probe);
        self
    }

    /// Replaces the CPU time source.
    pub fn with_cpu_source(mut self, cpu: impl CpuTimeSource + 'static) -> Self {
        self.cpu = Box::new(cpu);
        self
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Whether CPU-time lines should be produced regardless of any tracer.
    pub(crate) fn cpu_logging_enabled(&self) -> bool {
        self.config
            .log_cpu_time
            .unwrap_or_else(|| self.sink.is_enabled(log::Level::Info, TARGET_GC_CPU))
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::from_config(TraceConfig::default())
    }
}

impl std::fmt::Debug for TraceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
