//! Per-task records returned by the extraction backend

use crate::DatasetId;
use serde::{Deserialize, Serialize};

/// One `{dataset_name, value}` answer for a task
///
/// Records of the `dataset_name` task are stamped with the registry id they
/// were reconciled to; all other records carry no id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Dataset the answer refers to
    pub dataset_name: String,

    /// Task-specific answer
    pub value: String,

    /// Registry id, set only after reconciliation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<DatasetId>,
}

impl TaskRecord {
    /// Create an unreconciled record
    pub fn new(dataset_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            value: value.into(),
            unique_id: None,
        }
    }

    /// Stamp the record with a registry id
    pub fn with_unique_id(mut self, id: DatasetId) -> Self {
        self.unique_id = Some(id);
        self
    }
}
