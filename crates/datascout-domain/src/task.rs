//! Extraction tasks - the fixed categories of information pulled from papers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Requested task name is not one of the known tasks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid task: '{name}' (expected one of: domain, dataset_name, sub_domain, dataset_usage, dataset_type, labeling_type, availability)")]
pub struct InvalidTaskError {
    /// The rejected name
    pub name: String,
}

/// One category of metadata extracted from the paper batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionTask {
    /// Research domain of the paper (IoT, malware, network intrusion, ...)
    Domain,
    /// Datasets used, reconciled against the registry
    DatasetName,
    /// Sub-domains, attacks or vulnerabilities a dataset covers
    SubDomain,
    /// Portion of each dataset used by the research
    DatasetUsage,
    /// Realistic, synthetic or hybrid
    DatasetType,
    /// Labeled, unlabeled or hybrid
    LabelingType,
    /// Public, proprietary, restricted or custom
    Availability,
}

impl ExtractionTask {
    /// All tasks in their default processing order
    pub const ALL: [ExtractionTask; 7] = [
        ExtractionTask::Domain,
        ExtractionTask::DatasetName,
        ExtractionTask::SubDomain,
        ExtractionTask::DatasetUsage,
        ExtractionTask::DatasetType,
        ExtractionTask::LabelingType,
        ExtractionTask::Availability,
    ];

    /// Wire name, also used as the top-level key of the task's response
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionTask::Domain => "domain",
            ExtractionTask::DatasetName => "dataset_name",
            ExtractionTask::SubDomain => "sub_domain",
            ExtractionTask::DatasetUsage => "dataset_usage",
            ExtractionTask::DatasetType => "dataset_type",
            ExtractionTask::LabelingType => "labeling_type",
            ExtractionTask::Availability => "availability",
        }
    }

    /// Whether records of this task are reconciled against the registry
    pub fn reconciles_datasets(&self) -> bool {
        matches!(self, ExtractionTask::DatasetName)
    }
}

impl fmt::Display for ExtractionTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionTask {
    type Err = InvalidTaskError;

    /// Parse a task from its wire name
    ///
    /// # Examples
    ///
    /// ```
    /// use datascout_domain::ExtractionTask;
    ///
    /// let task: ExtractionTask = "dataset_usage".parse().unwrap();
    /// assert_eq!(task, ExtractionTask::DatasetUsage);
    /// assert!("citations".parse::<ExtractionTask>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExtractionTask::ALL
            .iter()
            .copied()
            .find(|task| task.as_str() == s.trim())
            .ok_or_else(|| InvalidTaskError { name: s.to_string() })
    }
}
