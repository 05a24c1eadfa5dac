//! Datascout LLM Backend Layer
//!
//! Implementations of the `ExtractionBackend` trait from `datascout-domain`.
//! Every backend receives system instructions, the combined paper text and a
//! JSON-schema response contract, and returns the raw JSON answer.
//!
//! # Backends
//!
//! - `MockBackend`: Deterministic canned answers for testing and dry runs
//! - `OpenAiBackend`: OpenAI chat completions with strict structured outputs
//! - `OllamaBackend`: Local Ollama chat API with schema-constrained output
//!
//! # Examples
//!
//! ```
//! use datascout_domain::traits::ExtractionBackend;
//! use datascout_domain::{ExtractionTask, ResponseContract};
//! use datascout_llm::MockBackend;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let backend = MockBackend::new(r#"{"domain": []}"#);
//! let contract = ResponseContract::new(ExtractionTask::Domain, "{}");
//! let answer = backend.complete("system", "user", &contract).await.unwrap();
//! assert_eq!(answer, r#"{"domain": []}"#);
//! # }
//! ```

#![warn(missing_docs)]

pub mod mock;
pub mod ollama;
pub mod openai;

use thiserror::Error;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;

/// Errors that can occur during backend calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// API key environment variable is unset
    #[error("API key not set: environment variable {0} is empty or missing")]
    MissingApiKey(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Parse a serialized response contract into a JSON value for embedding in a request
pub(crate) fn contract_schema(
    contract: &datascout_domain::ResponseContract,
) -> Result<serde_json::Value, LlmError> {
    serde_json::from_str(&contract.schema).map_err(|e| {
        LlmError::Other(format!(
            "Response contract '{}' is not valid JSON: {}",
            contract.name, e
        ))
    })
}
