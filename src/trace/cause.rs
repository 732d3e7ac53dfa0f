//! Pause Causes
//!
//! Why a pause was started. Rendered in parentheses after the event title.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification tag attached to a pause.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseCause {
    /// No cause; nothing is rendered.
    #[default]
    NoCause,
    AllocationFailure,
    SystemGc,
    MetadataThreshold,
    HeapInspection,
    HeapDump,
    WhiteBoxFullGc,
    /// Any other named trigger.
    Other(String),
}

impl PauseCause {
    /// Display name, or `None` for [`PauseCause::NoCause`].
    pub fn name(&self) -> Option<&str> {
        match self {
            PauseCause::NoCause => None,
            PauseCause::AllocationFailure => Some("Allocation Failure"),
            PauseCause::SystemGc => Some("System.gc()"),
            PauseCause::MetadataThreshold => Some("Metadata GC Threshold"),
            PauseCause::HeapInspection => Some("Heap Inspection Initiated GC"),
            PauseCause::HeapDump => Some("Heap Dump Initiated GC"),
            PauseCause::WhiteBoxFullGc => Some("WhiteBox Initiated Full GC"),
            PauseCause::Other(name) => Some(name.as_str()),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, PauseCause::NoCause)
    }
}

impl fmt::Display for PauseCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("No GC"))
    }
}

impl From<&str> for PauseCause {
    fn from(name: &str) -> Self {
        PauseCause::Other(name.to_string())
    }
}

/// Writes `title` followed by ` (cause)` when a cause is set.
pub(crate) fn heading(title: &str, cause: &PauseCause) -> String {
    match cause.name() {
        Some(name) => format!("{} ({})", title, name),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_without_cause() {
        assert_eq!(heading("Pause Young", &PauseCause::NoCause), "Pause Young");
    }

    #[test]
    fn test_heading_with_cause() {
        assert_eq!(
            heading("Pause Full", &PauseCause::SystemGc),
            "Pause Full (System.gc())"
        );
    }

    #[test]
    fn test_other_cause_from_str() {
        let cause = PauseCause::from("Periodic Collection");
        assert!(cause.is_set());
        assert_eq!(cause.to_string(), "Periodic Collection");
    }

    #[test]
    fn test_default_is_no_cause() {
        assert_eq!(PauseCause::default(), PauseCause::NoCause);
        assert!(!PauseCause::default().is_set());
    }
}
