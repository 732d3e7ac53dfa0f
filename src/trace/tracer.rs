//! Tracer Collaborator
//!
//! Receives the CPU-time summary of each pause it asked for.

use serde::Serialize;

/// Consumer of per-pause CPU-time events.
pub trait Tracer: Send + Sync {
    /// Queried once when a sampler is created.
    fn should_report_cpu_time_event(&self) -> bool;

    /// Called once when an active sampler ends with a valid reading.
    fn report_cpu_time_event(&self, user_time: f64, system_time: f64, real_time: f64);
}

/// CPU time spent during one pause, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CpuTimeReport {
    pub user: f64,
    pub system: f64,
    pub real: f64,
}

impl CpuTimeReport {
    /// The log line for this report.
    pub fn line(&self) -> String {
        format!(
            "User={:.2}s Sys={:.2}s Real={:.2}s",
            self.user, self.system, self.real
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_line() {
        let report = CpuTimeReport {
            user: 0.126,
            system: 0.02,
            real: 1.0,
        };
        assert_eq!(report.line(), "User=0.13s Sys=0.02s Real=1.00s");
    }

    #[test]
    fn test_report_json() {
        let report = CpuTimeReport {
            user: 0.5,
            system: 0.25,
            real: 2.0,
        };
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["user"], 0.5);
        assert_eq!(json["system"], 0.25);
        assert_eq!(json["real"], 2.0);
    }
}
