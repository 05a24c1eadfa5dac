//! Input and result types for extraction runs

use datascout_domain::{DatasetId, ExtractionTask, RunId, TaskRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One paper's extracted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    /// Display name (usually the file name)
    pub name: String,

    /// Full text
    pub text: String,
}

impl Paper {
    /// Create a paper
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Why a task produced no records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFailure {
    /// Task that failed
    pub task: ExtractionTask,

    /// Diagnostic message
    pub reason: String,
}

/// Result of running one task
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    /// Task that ran
    pub task: ExtractionTask,

    /// Records on success, failure reason otherwise
    pub result: Result<Vec<TaskRecord>, TaskFailure>,

    /// Wall time spent on the task in milliseconds
    pub elapsed_ms: u64,
}

/// How one extracted dataset was resolved against the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciledDataset {
    /// Name as extracted
    pub dataset_name: String,

    /// Registry id it resolved to
    pub unique_id: DatasetId,

    /// Whether the registry gained a new entry for it
    pub is_new: bool,
}

/// Everything produced by one orchestration run
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Identifier of the run
    pub run_id: RunId,

    /// Backend model used
    pub model_name: String,

    /// Number of papers sent with every task
    pub paper_count: usize,

    /// Per-task outcomes in processing order
    pub outcomes: Vec<TaskOutcome>,

    /// Registry resolution of every `dataset_name` record
    pub reconciliations: Vec<ReconciledDataset>,
}

impl ExtractionReport {
    /// Records of a task, if it ran and succeeded
    pub fn records(&self, task: ExtractionTask) -> Option<&[TaskRecord]> {
        self.outcomes
            .iter()
            .find(|o| o.task == task)
            .and_then(|o| o.result.as_ref().ok())
            .map(Vec::as_slice)
    }

    /// Successful tasks with their records, in processing order
    pub fn succeeded(&self) -> impl Iterator<Item = (ExtractionTask, &[TaskRecord])> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|r| (o.task, r.as_slice())))
    }

    /// Failed tasks, in processing order
    pub fn failures(&self) -> Vec<&TaskFailure> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err())
            .collect()
    }

    /// Ids issued to datasets first seen in this run
    pub fn new_dataset_ids(&self) -> Vec<DatasetId> {
        self.reconciliations
            .iter()
            .filter(|r| r.is_new)
            .map(|r| r.unique_id)
            .collect()
    }

    /// Serializable view: successful results and failures keyed by task
    pub fn to_document(&self) -> ResultsDocument {
        ResultsDocument {
            run_id: self.run_id,
            started_at_ms: self.run_id.timestamp_millis(),
            model: self.model_name.clone(),
            paper_count: self.paper_count,
            results: self
                .succeeded()
                .map(|(task, records)| (task, records.to_vec()))
                .collect(),
            failures: self
                .failures()
                .into_iter()
                .map(|f| (f.task, f.reason.clone()))
                .collect(),
            new_datasets: self.new_dataset_ids(),
        }
    }
}

/// Results file layout
#[derive(Debug, Clone, Serialize)]
pub struct ResultsDocument {
    /// Run identifier
    pub run_id: RunId,

    /// Run start, milliseconds since the Unix epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at_ms: Option<u64>,

    /// Backend model
    pub model: String,

    /// Papers processed
    pub paper_count: usize,

    /// Records of every successful task
    pub results: BTreeMap<ExtractionTask, Vec<TaskRecord>>,

    /// Reason for every failed task
    pub failures: BTreeMap<ExtractionTask, String>,

    /// Registry ids issued during the run
    pub new_datasets: Vec<DatasetId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ExtractionReport {
        ExtractionReport {
            run_id: RunId::new(),
            model_name: "mock".to_string(),
            paper_count: 2,
            outcomes: vec![
                TaskOutcome {
                    task: ExtractionTask::Domain,
                    result: Ok(vec![TaskRecord::new("NSL-KDD", "network intrusion")]),
                    elapsed_ms: 5,
                },
                TaskOutcome {
                    task: ExtractionTask::DatasetUsage,
                    result: Err(TaskFailure {
                        task: ExtractionTask::DatasetUsage,
                        reason: "timeout".to_string(),
                    }),
                    elapsed_ms: 7,
                },
            ],
            reconciliations: vec![
                ReconciledDataset {
                    dataset_name: "NSL-KDD".to_string(),
                    unique_id: DatasetId::new(2),
                    is_new: false,
                },
                ReconciledDataset {
                    dataset_name: "CIC-DDoS2019".to_string(),
                    unique_id: DatasetId::new(6),
                    is_new: true,
                },
            ],
        }
    }

    #[test]
    fn test_records_lookup() {
        let report = report();
        assert_eq!(report.records(ExtractionTask::Domain).unwrap().len(), 1);
        assert!(report.records(ExtractionTask::DatasetUsage).is_none());
        assert!(report.records(ExtractionTask::Availability).is_none());
    }

    #[test]
    fn test_failures_and_new_ids() {
        let report = report();
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].task, ExtractionTask::DatasetUsage);
        assert_eq!(report.new_dataset_ids(), vec![DatasetId::new(6)]);
    }

    #[test]
    fn test_document_layout() {
        let json = serde_json::to_value(report().to_document()).unwrap();
        assert_eq!(json["results"]["domain"][0]["value"], "network intrusion");
        assert!(json["results"].get("dataset_usage").is_none());
        assert_eq!(json["failures"]["dataset_usage"], "timeout");
        assert_eq!(json["new_datasets"][0], 6);
        assert_eq!(json["paper_count"], 2);
        assert!(json["started_at_ms"].as_u64().unwrap() > 0);
    }
}
