//! Scripted collaborators for unit tests.
//!
//! Every fake is cheaply cloneable and clones share state, so a test can
//! hand one clone to a [`TraceContext`](crate::TraceContext) and inspect
//! the other.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use log::Level;

use crate::logging::{LogSink, TARGET_GC_CPU};
use crate::sources::{CpuTimeSource, CpuTimes, FaultCounter, HeapUsage, PageIndexProbe, SourceError};
use crate::trace::Tracer;

/// One captured line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub level: Level,
    pub target: String,
    pub text: String,
}

/// Sink that records every line.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<LogLine>>>,
    cpu_enabled: Arc<AtomicBool>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_cpu_enabled(&self, enabled: bool) {
        self.cpu_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.lines().into_iter().map(|line| line.text).collect()
    }

    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.level == level)
            .map(|line| line.text)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn is_enabled(&self, level: Level, target: &str) -> bool {
        if target == TARGET_GC_CPU && level == Level::Info {
            return self.cpu_enabled.load(Ordering::SeqCst);
        }
        true
    }

    fn write(&self, level: Level, target: &str, line: &str) {
        self.lines.lock().unwrap().push(LogLine {
            level,
            target: target.to_string(),
            text: line.to_string(),
        });
    }
}

/// Heap whose `used` values are consumed in order; the last one repeats.
#[derive(Debug, Clone)]
pub struct FixedHeap {
    used: Arc<Mutex<VecDeque<usize>>>,
    capacity: usize,
    reads: Arc<AtomicUsize>,
}

impl FixedHeap {
    pub fn new(used: &[usize], capacity: usize) -> Self {
        Self {
            used: Arc::new(Mutex::new(used.iter().copied().collect())),
            capacity,
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl HeapUsage for FixedHeap {
    fn used(&self) -> usize {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let mut used = self.used.lock().unwrap();
        if used.len() > 1 {
            used.pop_front().unwrap_or(0)
        } else {
            used.front().copied().unwrap_or(0)
        }
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Fault counter answering from a script; an empty script fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFaults {
    answers: Arc<Mutex<VecDeque<Result<u64, SourceError>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedFaults {
    pub fn new(answers: Vec<Result<u64, SourceError>>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FaultCounter for ScriptedFaults {
    fn major_faults(&self) -> Result<u64, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SourceError::Unsupported("scripted faults")))
    }
}

/// Page index probe that fills the table with `0..len` or fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPageIndex {
    succeed: bool,
    queries: Arc<Mutex<Vec<u32>>>,
    resets: Arc<Mutex<Vec<u32>>>,
}

impl ScriptedPageIndex {
    pub fn new(succeed: bool) -> Self {
        Self {
            succeed,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<u32> {
        self.queries.lock().unwrap().clone()
    }

    pub fn resets(&self) -> Vec<u32> {
        self.resets.lock().unwrap().clone()
    }
}

impl PageIndexProbe for ScriptedPageIndex {
    fn query(&self, mode: u32, indices: &mut [u64]) -> Result<(), SourceError> {
        self.queries.lock().unwrap().push(mode);
        if !self.succeed {
            return Err(SourceError::Syscall {
                number: 455,
                errno: 38,
            });
        }
        for (i, slot) in indices.iter_mut().enumerate() {
            *slot = i as u64;
        }
        Ok(())
    }

    fn reset(&self, mode: u32) {
        self.resets.lock().unwrap().push(mode);
    }
}

/// CPU time source answering from a script; an empty script fails.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCpuTimes {
    answers: Arc<Mutex<VecDeque<Result<CpuTimes, SourceError>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedCpuTimes {
    pub fn new(answers: Vec<Result<CpuTimes, SourceError>>) -> Self {
        Self {
            answers: Arc::new(Mutex::new(answers.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CpuTimeSource for ScriptedCpuTimes {
    fn times(&self) -> Result<CpuTimes, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(SourceError::Invalid("script exhausted".to_string())))
    }
}

/// Tracer that records every report.
#[derive(Debug, Clone, Default)]
pub struct RecordingTracer {
    interested: bool,
    reports: Arc<Mutex<Vec<(f64, f64, f64)>>>,
}

impl RecordingTracer {
    pub fn new(interested: bool) -> Self {
        Self {
            interested,
            ..Self::default()
        }
    }

    pub fn reports(&self) -> Vec<(f64, f64, f64)> {
        self.reports.lock().unwrap().clone()
    }
}

impl Tracer for RecordingTracer {
    fn should_report_cpu_time_event(&self) -> bool {
        self.interested
    }

    fn report_cpu_time_event(&self, user_time: f64, system_time: f64, real_time: f64) {
        self.reports
            .lock()
            .unwrap()
            .push((user_time, system_time, real_time));
    }
}

pub fn cpu(real: f64, user: f64, system: f64) -> CpuTimes {
    CpuTimes { real, user, system }
}
