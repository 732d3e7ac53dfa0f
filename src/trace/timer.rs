//! Event Timer
//!
//! Times one pause and writes its summary line:
//!
//! ```text
//! Pause Young (Allocation Failure) 100M->60M(512M) majflt(10->12) 4.256ms
//! ```
//!
//! The heap/fault segment is present only when heap usage tracking is on
//! for the event. A timer is started once and ended once; the typestate
//! ([`EventTimer`] → [`StartedEvent`] → [`EventRecord`]) enforces this.

use log::{debug, Level};
use serde::Serialize;

use super::cause::{heading, PauseCause};
use super::context::TraceContext;
use crate::logging::TARGET_GC;
use crate::sources::page_index::format_page_indices;
use crate::sources::{millis, Ticks, FAULTY_PAGE_TABLE_LEN, M, MODE_QUERY, MODE_RESET};

/// Shown for a start-time fault count that could not be read.
pub const FAULTS_UNSET: &str = "-";

/// Shown for an end-time fault count that could not be read.
pub const FAULTS_UNKNOWN: &str = "unknown";

/// A pause that has not started yet.
#[derive(Debug)]
pub struct EventTimer<'a> {
    ctx: &'a TraceContext,
    title: String,
    cause: PauseCause,
    log_heap_usage: bool,
}

impl<'a> EventTimer<'a> {
    /// Creates a timer. Heap usage tracking follows the context config.
    pub fn new(ctx: &'a TraceContext, title: impl Into<String>, cause: PauseCause) -> Self {
        Self {
            ctx,
            title: title.into(),
            cause,
            log_heap_usage: ctx.config.log_heap_usage,
        }
    }

    /// Overrides heap usage tracking for this event only.
    pub fn with_heap_usage(mut self, enabled: bool) -> Self {
        self.log_heap_usage = enabled;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Starts the event at the current time.
    pub fn start_now(self) -> StartedEvent<'a> {
        self.start(Ticks::now())
    }

    /// Starts the event at `now`.
    ///
    /// Writes the heading line, then captures the heap and fault baselines
    /// if tracking is on. A failed fault read leaves the baseline unset.
    pub fn start(self, now: Ticks) -> StartedEvent<'a> {
        let ctx = self.ctx;
        ctx.sink
            .write(Level::Info, TARGET_GC, &heading(&self.title, &self.cause));

        let mut usage_before = None;
        let mut majflt_before = None;
        if self.log_heap_usage {
            usage_before = Some(ctx.heap.used());
            majflt_before = match ctx.faults.major_faults() {
                Ok(count) => Some(count),
                Err(err) => {
                    debug!(target: TARGET_GC, "{}: start fault count unavailable: {}", self.title, err);
                    None
                }
            };
        }

        StartedEvent {
            timer: self,
            start_tick: now,
            usage_before,
            majflt_before,
        }
    }
}

/// A running pause.
#[derive(Debug)]
pub struct StartedEvent<'a> {
    timer: EventTimer<'a>,
    start_tick: Ticks,
    usage_before: Option<usize>,
    majflt_before: Option<u64>,
}

impl<'a> StartedEvent<'a> {
    pub fn title(&self) -> &str {
        &self.timer.title
    }

    pub fn start_tick(&self) -> Ticks {
        self.start_tick
    }

    /// Ends the event at the current time.
    pub fn end_now(self) -> EventRecord {
        self.end(Ticks::now())
    }

    /// Ends the event at `now` and writes the summary line.
    ///
    /// Full pauses with heap tracking on also dump the faulty page index
    /// table, and the table is reset afterwards whether or not the query
    /// succeeded.
    pub fn end(self, now: Ticks) -> EventRecord {
        let ctx = self.timer.ctx;
        let title = &self.timer.title;
        let duration_ms = millis(now - self.start_tick);

        let mut line = heading(title, &self.timer.cause);

        let heap = self.usage_before.map(|used_before| {
            let majflt_after = match ctx.faults.major_faults() {
                Ok(count) => Some(count),
                Err(err) => {
                    debug!(target: TARGET_GC, "{}: end fault count unavailable: {}", title, err);
                    None
                }
            };
            let delta = HeapDelta {
                before_mb: used_before / M,
                after_mb: ctx.heap.used() / M,
                capacity_mb: ctx.heap.capacity() / M,
                majflt_before: self.majflt_before,
                majflt_after,
            };
            line.push(' ');
            line.push_str(&delta.segment());
            delta
        });

        line.push_str(&format!(" {:.3}ms", duration_ms));
        ctx.sink.write(Level::Info, TARGET_GC, &line);

        let faulty_pages = if self.usage_before.is_some() && ctx.config.is_full_pause(title) {
            dump_faulty_pages(ctx, title)
        } else {
            None
        };

        EventRecord {
            title: title.clone(),
            cause: self.timer.cause.name().map(str::to_string),
            duration_ms,
            heap,
            faulty_pages,
            line,
        }
    }
}

/// Queries, logs and resets the faulty page index table.
fn dump_faulty_pages(ctx: &TraceContext, title: &str) -> Option<usize> {
    let mut indices = vec![0u64; FAULTY_PAGE_TABLE_LEN];
    let logged = match ctx.page_index.query(MODE_QUERY, &mut indices) {
        Ok(()) => {
            ctx.sink
                .write(Level::Info, TARGET_GC, &format_page_indices(&indices));
            Some(indices.len())
        }
        Err(err) => {
            debug!(target: TARGET_GC, "{}: faulty page index unavailable: {}", title, err);
            None
        }
    };
    ctx.page_index.reset(MODE_RESET);
    logged
}

/// Heap and fault movement across one pause. Sizes are in megabytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeapDelta {
    pub before_mb: usize,
    pub after_mb: usize,
    pub capacity_mb: usize,
    pub majflt_before: Option<u64>,
    pub majflt_after: Option<u64>,
}

impl HeapDelta {
    /// `100M->60M(512M) majflt(10->12)`
    pub fn segment(&self) -> String {
        let before = self
            .majflt_before
            .map_or_else(|| FAULTS_UNSET.to_string(), |count| count.to_string());
        let after = self
            .majflt_after
            .map_or_else(|| FAULTS_UNKNOWN.to_string(), |count| count.to_string());
        format!(
            "{}M->{}M({}M) majflt({}->{})",
            self.before_mb, self.after_mb, self.capacity_mb, before, after
        )
    }

    /// Faults taken during the pause, when both reads succeeded.
    pub fn major_faults(&self) -> Option<u64> {
        match (self.majflt_before, self.majflt_after) {
            (Some(before), Some(after)) => Some(after.saturating_sub(before)),
            _ => None,
        }
    }
}

/// What was reported for one pause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub title: String,
    pub cause: Option<String>,
    pub duration_ms: f64,
    pub heap: Option<HeapDelta>,
    /// Entries logged from the faulty page index table, if it was dumped.
    pub faulty_pages: Option<usize>,
    /// The summary line as written.
    pub line: String,
}

impl EventRecord {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
