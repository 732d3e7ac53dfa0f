//! Measurement Source Errors
//!
//! Failures reported by the OS-level statistics interfaces. These never
//! escape the timing components; they are turned into sentinels or
//! warning lines at the point of use.

use thiserror::Error;

/// Failure of a single read against an external statistics source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The kernel call returned a non-zero status.
    #[error("syscall {number} failed with errno {errno}")]
    Syscall { number: i64, errno: i32 },

    /// A libc call reported failure.
    #[error("{call}() failed with errno {errno}")]
    Libc { call: &'static str, errno: i32 },

    /// The interface does not exist on this platform or was disabled.
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// The source answered but the values were not usable.
    #[error("invalid result: {0}")]
    Invalid(String),
}

impl SourceError {
    /// Builds a `Libc` error from the calling thread's current errno.
    pub(crate) fn last_libc(call: &'static str) -> Self {
        SourceError::Libc {
            call,
            errno: last_errno(),
        }
    }

    /// Builds a `Syscall` error from the calling thread's current errno.
    pub(crate) fn last_syscall(number: i64) -> Self {
        SourceError::Syscall {
            number,
            errno: last_errno(),
        }
    }
}

fn last_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syscall_error_display() {
        let err = SourceError::Syscall {
            number: 452,
            errno: 38,
        };
        assert_eq!(err.to_string(), "syscall 452 failed with errno 38");
    }

    #[test]
    fn test_unsupported_display() {
        let err = SourceError::Unsupported("faulty page index");
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn test_libc_error_display() {
        let err = SourceError::Libc {
            call: "times",
            errno: 14,
        };
        assert_eq!(err.to_string(), "times() failed with errno 14");
    }
}
