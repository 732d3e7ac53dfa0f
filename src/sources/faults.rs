//! Major Page Fault Counters
//!
//! Two implementations are provided:
//!
//! - [`SwapStatsFaultCounter`]: the `get_swap_stats` kernel extension
//!   (syscall 452), which reports faults served from swap
//! - [`RusageFaultCounter`]: `getrusage(RUSAGE_SELF).ru_majflt`, available
//!   on any Unix

use super::error::SourceError;

/// Syscall number of `int sys_get_swap_stats(struct swap_stats *stats)`.
pub const SWAP_STATS_SYSCALL: i64 = 452;

/// A source of the process's major fault count.
pub trait FaultCounter: Send + Sync {
    /// Reads the current counter value.
    fn major_faults(&self) -> Result<u64, SourceError>;
}

/// Layout filled in by the swap-stats syscall.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct SwapStats {
    majflt: libc::c_uint,
    majflt_in_region: libc::c_uint,
}

/// Major fault counter backed by the swap-stats kernel extension.
///
/// Only meaningful on kernels carrying the extension. Mainline kernels
/// assign 452 to an unrelated call, so this counter is opt-in.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwapStatsFaultCounter;

impl FaultCounter for SwapStatsFaultCounter {
    #[cfg(target_os = "linux")]
    fn major_faults(&self) -> Result<u64, SourceError> {
        let mut stats = SwapStats::default();
        // SAFETY: the kernel writes at most one `swap_stats` into `stats`.
        let rc = unsafe {
            libc::syscall(
                SWAP_STATS_SYSCALL as libc::c_long,
                &mut stats as *mut SwapStats,
            )
        };
        if rc != 0 {
            return Err(SourceError::last_syscall(SWAP_STATS_SYSCALL));
        }
        Ok(u64::from(stats.majflt))
    }

    #[cfg(not(target_os = "linux"))]
    fn major_faults(&self) -> Result<u64, SourceError> {
        Err(SourceError::Unsupported("swap stats"))
    }
}

/// Major fault counter backed by `getrusage`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RusageFaultCounter;

impl FaultCounter for RusageFaultCounter {
    fn major_faults(&self) -> Result<u64, SourceError> {
        let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
        // SAFETY: `usage` is a valid out-pointer for one `rusage`.
        let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
        if rc != 0 {
            return Err(SourceError::last_libc("getrusage"));
        }
        // SAFETY: getrusage succeeded and initialised the struct.
        let usage = unsafe { usage.assume_init() };
        u64::try_from(usage.ru_majflt)
            .map_err(|_| SourceError::Invalid(format!("negative ru_majflt {}", usage.ru_majflt)))
    }
}

/// Counter that is never available. Used when fault tracking is configured off.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFaultCounter;

impl FaultCounter for NoFaultCounter {
    fn major_faults(&self) -> Result<u64, SourceError> {
        Err(SourceError::Unsupported("major fault counter"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rusage_counter_reads() {
        let first = RusageFaultCounter.major_faults().unwrap();
        let second = RusageFaultCounter.major_faults().unwrap();
        assert!(second >= first);
    }

    #[test]
    fn test_no_fault_counter_is_unsupported() {
        assert!(matches!(
            NoFaultCounter.major_faults(),
            Err(SourceError::Unsupported(_))
        ));
    }

    #[test]
    fn test_swap_stats_layout() {
        assert_eq!(std::mem::size_of::<SwapStats>(), 8);
    }
}
