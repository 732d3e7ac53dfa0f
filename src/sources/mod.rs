//! Measurement Sources Module
//!
//! Boundaries to the clocks and kernel statistics a pause is measured
//! with. Every source is a small trait with an OS-backed default, so the
//! timing components can be driven by scripted sources in tests.
//!
//! # Components
//!
//! - [`Ticks`]: Monotonic timestamps
//! - [`HeapUsage`]: Used and reserved heap bytes
//! - [`FaultCounter`]: Major page fault counter
//! - [`PageIndexProbe`]: Faulty page index diagnostic
//! - [`CpuTimeSource`]: Real/user/system process time

pub mod clock;
pub mod cpu;
pub mod error;
pub mod faults;
pub mod heap;
pub mod page_index;

pub use clock::{millis, Ticks};
pub use cpu::{CpuTimeSource, CpuTimes, ProcessCpuTimes};
pub use error::SourceError;
pub use faults::{FaultCounter, NoFaultCounter, RusageFaultCounter, SwapStatsFaultCounter};
pub use heap::{HeapUsage, ProcessMemory, M};
pub use page_index::{
    FaultyPageIndexSyscall, NoPageIndex, PageIndexProbe, FAULTY_PAGE_TABLE_LEN, MODE_QUERY,
    MODE_RESET,
};
