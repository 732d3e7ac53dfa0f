//! Memory Usage Accessor
//!
//! Reports how many bytes the managed heap is using and how large it
//! currently is. The default implementation uses the current process's
//! resident and virtual size as reported by `sysinfo`.

use sysinfo::{get_current_pid, Pid, ProcessRefreshKind, System};

/// Bytes in one megabyte, the unit used for usage in log lines.
pub const M: usize = 1024 * 1024;

/// Read access to heap occupancy.
pub trait HeapUsage: Send + Sync {
    /// Bytes currently in use.
    fn used(&self) -> usize;

    /// Bytes currently reserved for the heap.
    fn capacity(&self) -> usize;
}

/// Process-level memory usage.
///
/// `used` is the resident set size and `capacity` the virtual size. When
/// the process cannot be found both report zero.
#[derive(Debug, Clone)]
pub struct ProcessMemory {
    process_id: Option<Pid>,
}

impl ProcessMemory {
    /// Creates an accessor for the current process.
    pub fn new() -> Self {
        Self {
            process_id: get_current_pid().ok(),
        }
    }

    /// Refreshes and returns `(resident, virtual)` in bytes.
    fn sample(&self) -> (u64, u64) {
        let Some(pid) = self.process_id else {
            return (0, 0);
        };

        let mut system = System::new();
        let refresh_kind = ProcessRefreshKind::new().with_memory();
        if !system.refresh_process_specifics(pid, refresh_kind) {
            return (0, 0);
        }

        system
            .process(pid)
            .map(|process| (process.memory(), process.virtual_memory()))
            .unwrap_or((0, 0))
    }
}

impl Default for ProcessMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl HeapUsage for ProcessMemory {
    fn used(&self) -> usize {
        to_usize(self.sample().0)
    }

    fn capacity(&self) -> usize {
        to_usize(self.sample().1)
    }
}

fn to_usize(bytes: u64) -> usize {
    usize::try_from(bytes).unwrap_or(usize::MAX)
}
