//! Response contract handed to the extraction backend

use crate::ExtractionTask;

/// JSON schema the backend's answer must satisfy
///
/// The schema is kept as serialized JSON so this crate stays free of a JSON
/// library; backends parse it when they need to embed it in a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseContract {
    /// Task the contract belongs to
    pub task: ExtractionTask,

    /// Schema name (`<task>_extraction`)
    pub name: String,

    /// Serialized JSON schema
    pub schema: String,
}

impl ResponseContract {
    /// Create a contract for a task from a serialized schema
    pub fn new(task: ExtractionTask, schema: impl Into<String>) -> Self {
        Self {
            task,
            name: format!("{}_extraction", task.as_str()),
            schema: schema.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_name_follows_task() {
        let contract = ResponseContract::new(ExtractionTask::DatasetType, "{}");
        assert_eq!(contract.name, "dataset_type_extraction");
    }
}
