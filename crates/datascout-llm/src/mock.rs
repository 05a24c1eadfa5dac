//! Mock backend for deterministic testing
//!
//! Returns pre-configured answers per task without making any network calls.

use crate::LlmError;
use datascout_domain::traits::ExtractionBackend;
use datascout_domain::{ExtractionTask, ResponseContract};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A call observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Task the contract belonged to
    pub task: ExtractionTask,
    /// System instructions sent
    pub system_instructions: String,
    /// User content sent
    pub user_content: String,
}

#[derive(Debug, Clone)]
enum MockReply {
    Answer(String),
    Error(String),
}

/// Mock backend keyed by task
///
/// # Examples
///
/// ```
/// use datascout_domain::ExtractionTask;
/// use datascout_llm::MockBackend;
///
/// let mut backend = MockBackend::default();
/// backend.add_response(ExtractionTask::Domain, r#"{"domain": []}"#);
/// backend.add_error(ExtractionTask::DatasetUsage, "service unavailable");
/// assert_eq!(backend.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockBackend {
    default_response: Option<String>,
    responses: Arc<Mutex<HashMap<ExtractionTask, MockReply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    model: String,
}

impl MockBackend {
    /// Create a mock that answers every task with the same text
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: Some(response.into()),
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            model: "mock".to_string(),
        }
    }

    /// Create a mock that answers every task with an empty, contract-conforming result
    pub fn empty_results() -> Self {
        Self {
            default_response: None,
            ..Self::new("")
        }
    }

    /// Set the answer for a specific task
    pub fn add_response(&mut self, task: ExtractionTask, response: impl Into<String>) {
        lock(&self.responses).insert(task, MockReply::Answer(response.into()));
    }

    /// Make a specific task fail with a communication error
    pub fn add_error(&mut self, task: ExtractionTask, message: impl Into<String>) {
        lock(&self.responses).insert(task, MockReply::Error(message.into()));
    }

    /// Number of completed calls
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// All calls made so far, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Reset the recorded calls
    pub fn reset_calls(&self) {
        lock(&self.calls).clear();
    }

    fn reply_for(&self, task: ExtractionTask) -> Result<String, LlmError> {
        match lock(&self.responses).get(&task) {
            Some(MockReply::Answer(answer)) => Ok(answer.clone()),
            Some(MockReply::Error(message)) => Err(LlmError::Communication(message.clone())),
            None => match &self.default_response {
                Some(answer) => Ok(answer.clone()),
                None => Ok(format!("{{\"{}\": []}}", task.as_str())),
            },
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::empty_results()
    }
}

impl ExtractionBackend for MockBackend {
    type Error = LlmError;

    async fn complete(
        &self,
        system_instructions: &str,
        user_content: &str,
        contract: &ResponseContract,
    ) -> Result<String, Self::Error> {
        lock(&self.calls).push(RecordedCall {
            task: contract.task,
            system_instructions: system_instructions.to_string(),
            user_content: user_content.to_string(),
        });

        self.reply_for(contract.task)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
