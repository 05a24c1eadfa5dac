//! Configuration for the Extractor

use datascout_domain::ExtractionTask;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for an extraction run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Tasks to run, in order
    pub tasks: Vec<ExtractionTask>,

    /// Maximum characters taken from each paper (0 = no limit)
    pub max_text_length: usize,

    /// Maximum time for a single backend call (unset = wait indefinitely)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Maximum registry entries embedded in the dataset prompt (0 = all)
    pub registry_hint_limit: usize,
}

impl ExtractorConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Replace the task list
    pub fn with_tasks(mut self, tasks: Vec<ExtractionTask>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tasks.is_empty() {
            return Err("tasks must name at least one task".to_string());
        }
        for (idx, task) in self.tasks.iter().enumerate() {
            if self.tasks[..idx].contains(task) {
                return Err(format!("task '{}' is listed more than once", task));
            }
        }
        if self.request_timeout_secs == Some(0) {
            return Err("request_timeout_secs must be greater than 0 when set".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    /// All seven tasks, whole papers, no timeout
    fn default() -> Self {
        Self {
            tasks: ExtractionTask::ALL.to_vec(),
            max_text_length: 0,
            request_timeout_secs: None,
            registry_hint_limit: 0,
        }
    }
}

impl ExtractorConfig {
    /// Only reconcile datasets against the registry
    pub fn datasets_only() -> Self {
        Self {
            tasks: vec![ExtractionTask::DatasetName],
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
