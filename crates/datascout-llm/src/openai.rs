//! OpenAI Backend Implementation
//!
//! Calls the chat completions API with a strict `json_schema` response
//! format, so the model's answer is guaranteed to follow the task contract.
//!
//! # Examples
//!
//! ```no_run
//! use datascout_llm::OpenAiBackend;
//!
//! let backend = OpenAiBackend::from_env("OPENAI_API_KEY", "gpt-4o-2024-08-06").unwrap();
//! ```

use crate::{contract_schema, LlmError};
use datascout_domain::traits::ExtractionBackend;
use datascout_domain::ResponseContract;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// OpenAI chat completions backend
pub struct OpenAiBackend {
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    schema: serde_json::Value,
    strict: bool,
}

/// Chat completions response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl OpenAiBackend {
    /// Create a new OpenAI backend
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            temperature: DEFAULT_TEMPERATURE,
            client: reqwest::Client::new(),
        }
    }

    /// Create a backend reading the API key from an environment variable
    pub fn from_env(key_var: &str, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = std::env::var(key_var)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey(key_var.to_string()))?;
        Ok(Self::new(api_key, model))
    }

    /// Use a different API base URL (proxies, Azure-compatible gateways)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn build_request<'a>(
        &'a self,
        system_instructions: &'a str,
        user_content: &'a str,
        contract: &'a ResponseContract,
    ) -> Result<ChatRequest<'a>, LlmError> {
        Ok(ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_instructions,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            temperature: self.temperature,
            response_format: ResponseFormat {
                format_type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &contract.name,
                    schema: contract_schema(contract)?,
                    strict: true,
                },
            },
        })
    }
}

/// Pull the answer text out of a chat completions response body
fn answer_from_body(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let message = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?
        .message;

    if let Some(refusal) = message.refusal {
        return Err(LlmError::InvalidResponse(format!("Model refused: {}", refusal)));
    }

    message
        .content
        .ok_or_else(|| LlmError::InvalidResponse("No content in response".to_string()))
}

impl ExtractionBackend for OpenAiBackend {
    type Error = LlmError;

    async fn complete(
        &self,
        system_instructions: &str,
        user_content: &str,
        contract: &ResponseContract,
    ) -> Result<String, Self::Error> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = self.build_request(system_instructions, user_content, contract)?;

        debug!("POST {} ({} schema)", url, contract.name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, body)));
        }

        answer_from_body(&body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datascout_domain::ExtractionTask;

    fn contract() -> ResponseContract {
        ResponseContract::new(
            ExtractionTask::Domain,
            r#"{"type": "object", "properties": {}, "additionalProperties": false}"#,
        )
    }

    #[test]
    fn test_openai_backend_creation() {
        let backend = OpenAiBackend::new("sk-test", "gpt-4o-mini");
        assert_eq!(backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(backend.model, "gpt-4o-mini");
        assert_eq!(backend.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn test_openai_backend_builders() {
        let backend = OpenAiBackend::new("sk-test", DEFAULT_MODEL)
            .with_base_url("http://localhost:8000/v1/")
            .with_temperature(0.0);
        assert_eq!(backend.base_url, "http://localhost:8000/v1");
        assert_eq!(backend.temperature, 0.0);
    }

    #[test]
    fn test_from_env_missing_key() {
        let result = OpenAiBackend::from_env("DATASCOUT_TEST_UNSET_KEY", DEFAULT_MODEL);
        assert!(matches!(result, Err(LlmError::MissingApiKey(var)) if var == "DATASCOUT_TEST_UNSET_KEY"));
    }

    #[test]
    fn test_request_shape() {
        let backend = OpenAiBackend::new("sk-test", DEFAULT_MODEL);
        let contract = contract();
        let request = backend.build_request("sys", "papers", &contract).unwrap();
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "sys");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "papers");
        assert_eq!(json["response_format"]["type"], "json_schema");
        assert_eq!(json["response_format"]["json_schema"]["name"], "domain_extraction");
        assert_eq!(json["response_format"]["json_schema"]["strict"], true);
        assert_eq!(json["response_format"]["json_schema"]["schema"]["type"], "object");
    }

    #[test]
    fn test_request_rejects_invalid_schema() {
        let backend = OpenAiBackend::new("sk-test", DEFAULT_MODEL);
        let contract = ResponseContract::new(ExtractionTask::Domain, "{not json");
        assert!(backend.build_request("s", "u", &contract).is_err());
    }

    #[test]
    fn test_answer_from_body() {
        let body = r#"{"choices": [{"message": {"content": "{\"domain\": []}"}}]}"#;
        assert_eq!(answer_from_body(body).unwrap(), r#"{"domain": []}"#);
    }

    #[test]
    fn test_answer_from_body_refusal() {
        let body = r#"{"choices": [{"message": {"content": null, "refusal": "cannot help"}}]}"#;
        assert!(matches!(answer_from_body(body), Err(LlmError::InvalidResponse(_))));
    }

    #[test]
    fn test_answer_from_body_no_choices() {
        assert!(answer_from_body(r#"{"choices": []}"#).is_err());
        assert!(answer_from_body("not json").is_err());
    }

    #[tokio::test]
    async fn test_openai_error_handling() {
        // Nothing listens on port 1
        let backend = OpenAiBackend::new("sk-test", DEFAULT_MODEL)
            .with_base_url("http://127.0.0.1:1/v1");

        let result = backend.complete("s", "u", &contract()).await;
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
