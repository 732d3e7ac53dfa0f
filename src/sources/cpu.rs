//! Process CPU Time
//!
//! Real, user and system time of the current process in seconds, read
//! through `times(2)`.

use super::error::SourceError;

/// One reading of the process clocks, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CpuTimes {
    pub real: f64,
    pub user: f64,
    pub system: f64,
}

impl CpuTimes {
    /// Per-clock difference `self - earlier`.
    pub fn since(&self, earlier: &CpuTimes) -> CpuTimes {
        CpuTimes {
            real: self.real - earlier.real,
            user: self.user - earlier.user,
            system: self.system - earlier.system,
        }
    }
}

/// A source of process CPU times.
pub trait CpuTimeSource: Send + Sync {
    /// Reads the current clocks.
    fn times(&self) -> Result<CpuTimes, SourceError>;
}

/// CPU times of the current process from `times(2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessCpuTimes;

impl CpuTimeSource for ProcessCpuTimes {
    fn times(&self) -> Result<CpuTimes, SourceError> {
        // SAFETY: sysconf has no memory-safety preconditions.
        let ticks_per_sec = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
        if ticks_per_sec <= 0 {
            return Err(SourceError::Invalid(format!(
                "clock ticks per second is {}",
                ticks_per_sec
            )));
        }

        let mut buf = std::mem::MaybeUninit::<libc::tms>::zeroed();
        // SAFETY: `buf` is a valid out-pointer for one `tms`.
        let real_ticks = unsafe { libc::times(buf.as_mut_ptr()) };
        if real_ticks == (-1i64) as libc::clock_t {
            return Err(SourceError::last_libc("times"));
        }
        // SAFETY: times succeeded and initialised the struct.
        let buf = unsafe { buf.assume_init() };

        let ticks = ticks_per_sec as f64;
        Ok(CpuTimes {
            real: real_ticks as f64 / ticks,
            user: buf.tms_utime as f64 / ticks,
            system: buf.tms_stime as f64 / ticks,
        })
    }
}
