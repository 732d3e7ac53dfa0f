//! Faulty Page Index Diagnostic
//!
//! Wraps the `faulty_page_index` kernel extension (syscall 455). A query
//! copies the recorded page indices into a fixed-size table; a reset clears
//! the kernel-side profile so it does not carry over into the next event.
//!
//! Mainline kernels assign 455 to an unrelated call, so the syscall-backed
//! probe is only installed when configured.

use super::error::SourceError;

/// Syscall number of `int faulty_page_index(unsigned int mode, unsigned long *indices)`.
pub const FAULTY_PAGE_INDEX_SYSCALL: i64 = 455;

/// Number of entries returned by one query.
pub const FAULTY_PAGE_TABLE_LEN: usize = 2048;

/// Mode flag requesting the table.
pub const MODE_QUERY: u32 = 3;

/// Mode flag clearing the kernel-side profile.
pub const MODE_RESET: u32 = 2;

/// The page-index diagnostic interface.
pub trait PageIndexProbe: Send + Sync {
    /// Fills `indices` with the recorded page indices.
    ///
    /// `indices` must hold [`FAULTY_PAGE_TABLE_LEN`] entries.
    fn query(&self, mode: u32, indices: &mut [u64]) -> Result<(), SourceError>;

    /// Clears recorded state. The outcome is not observable.
    fn reset(&self, mode: u32);
}

/// Page-index probe backed by the kernel extension.
#[derive(Debug, Default, Clone, Copy)]
pub struct FaultyPageIndexSyscall;

impl PageIndexProbe for FaultyPageIndexSyscall {
    #[cfg(all(target_os = "linux", target_pointer_width = "64"))]
    fn query(&self, mode: u32, indices: &mut [u64]) -> Result<(), SourceError> {
        if indices.len() < FAULTY_PAGE_TABLE_LEN {
            return Err(SourceError::Invalid(format!(
                "page index buffer holds {} entries, need {}",
                indices.len(),
                FAULTY_PAGE_TABLE_LEN
            )));
        }
        // SAFETY: the buffer holds FAULTY_PAGE_TABLE_LEN unsigned longs,
        // which is the most the kernel writes.
        let rc = unsafe {
            libc::syscall(
                FAULTY_PAGE_INDEX_SYSCALL as libc::c_long,
                mode as libc::c_uint,
                indices.as_mut_ptr() as *mut libc::c_ulong,
                0 as libc::c_int,
            )
        };
        if rc != 0 {
            return Err(SourceError::last_syscall(FAULTY_PAGE_INDEX_SYSCALL));
        }
        Ok(())
    }

    #[cfg(not(all(target_os = "linux", target_pointer_width = "64")))]
    fn query(&self, _mode: u32, _indices: &mut [u64]) -> Result<(), SourceError> {
        Err(SourceError::Unsupported("faulty page index"))
    }

    #[cfg(all(target_os = "linux", target_pointer_width = "64"))]
    fn reset(&self, mode: u32) {
        // SAFETY: reset mode ignores the pointer argument.
        unsafe {
            libc::syscall(
                FAULTY_PAGE_INDEX_SYSCALL as libc::c_long,
                mode as libc::c_uint,
                std::ptr::null_mut::<libc::c_ulong>(),
                0 as libc::c_int,
            );
        }
    }

    #[cfg(not(all(target_os = "linux", target_pointer_width = "64")))]
    fn reset(&self, _mode: u32) {}
}

/// Probe used when the diagnostic is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPageIndex;

impl PageIndexProbe for NoPageIndex {
    fn query(&self, _mode: u32, _indices: &mut [u64]) -> Result<(), SourceError> {
        Err(SourceError::Unsupported("faulty page index"))
    }

    fn reset(&self, _mode: u32) {}
}

/// Renders a page table as the diagnostic log line.
pub fn format_page_indices(indices: &[u64]) -> String {
    let values: Vec<String> = indices.iter().map(|index| index.to_string()).collect();
    format!("faulty page index: {}", values.join(","))
}
