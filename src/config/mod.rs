//! Trace Configuration
//!
//! Controls which optional measurements a pause carries. Configuration can
//! be built in code or loaded from a YAML or JSON file:
//!
//! ```yaml
//! log_heap_usage: true
//! log_cpu_time: null        # ask the log sink
//! fault_source: rusage      # swap_stats | rusage | none
//! page_index: false
//! full_pause_marker: "Pause Full"
//! ```

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title fragment that marks a full collection pause.
pub const DEFAULT_FULL_PAUSE_MARKER: &str = "Pause Full";

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which interface supplies the major fault counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultSource {
    /// The swap-stats kernel extension (syscall 452).
    SwapStats,
    /// `getrusage(RUSAGE_SELF).ru_majflt`.
    #[default]
    Rusage,
    /// No counter; fault segments show sentinels.
    None,
}

/// Settings for pause tracing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Track memory usage and major faults across each pause.
    pub log_heap_usage: bool,

    /// Force CPU-time logging on or off. `None` asks the log sink.
    pub log_cpu_time: Option<bool>,

    /// Fault counter backing the `majflt(..)` segment.
    pub fault_source: FaultSource,

    /// Query the faulty page index table after full pauses.
    pub page_index: bool,

    /// Titles containing this text count as full pauses.
    pub full_pause_marker: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            log_heap_usage: true,
            log_cpu_time: None,
            fault_source: FaultSource::default(),
            page_index: false,
            full_pause_marker: DEFAULT_FULL_PAUSE_MARKER.to_string(),
        }
    }
}

impl TraceConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Whether `title` names a full collection pause.
    pub fn is_full_pause(&self, title: &str) -> bool {
        !self.full_pause_marker.is_empty() && title.contains(&self.full_pause_marker)
    }
}

/// Loads a configuration file.
///
/// Files ending in `.json` are parsed as JSON; anything else as YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TraceConfig, ConfigError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let config = if is_json {
        TraceConfig::from_json_str(&text)?
    } else {
        TraceConfig::from_yaml_str(&text)?
    };

    debug!("Loaded trace config from {}: {:?}", path.display(), config);
    Ok(config)
}
