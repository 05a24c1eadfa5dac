//! Backend selection from configuration.

use crate::config::{BackendConfig, Provider};
use datascout_domain::traits::ExtractionBackend;
use datascout_domain::ResponseContract;
use datascout_llm::{LlmError, MockBackend, OllamaBackend, OpenAiBackend};
use tracing::info;

/// The backend chosen at startup.
///
/// `ExtractionBackend` is not object safe, so the concrete backends are
/// wrapped in an enum that forwards each call.
pub enum Backend {
    /// OpenAI chat completions
    OpenAi(OpenAiBackend),
    /// Local Ollama server
    Ollama(OllamaBackend),
    /// Mock backend (dry runs)
    Mock(MockBackend),
}

impl Backend {
    /// Build the configured backend.
    ///
    /// OpenAI reads its key from `config.api_key_env` and fails when it is unset.
    pub fn from_config(config: &BackendConfig) -> Result<Self, LlmError> {
        let backend = match config.provider {
            Provider::OpenAi => {
                let mut backend = OpenAiBackend::from_env(&config.api_key_env, config.model.clone())?
                    .with_temperature(config.temperature);
                if let Some(endpoint) = &config.endpoint {
                    backend = backend.with_base_url(endpoint.clone());
                }
                Backend::OpenAi(backend)
            }
            Provider::Ollama => {
                let backend = match &config.endpoint {
                    Some(endpoint) => OllamaBackend::new(endpoint.clone(), config.model.clone()),
                    None => OllamaBackend::default_endpoint(config.model.clone()),
                };
                Backend::Ollama(backend.with_temperature(config.temperature))
            }
            Provider::Mock => Backend::Mock(MockBackend::empty_results()),
        };

        info!("Using {} backend with model '{}'", backend.provider_name(), backend.model_name());
        Ok(backend)
    }

    /// Short provider label for display.
    pub fn provider_name(&self) -> &'static str {
        match self {
            Backend::OpenAi(_) => "openai",
            Backend::Ollama(_) => "ollama",
            Backend::Mock(_) => "mock",
        }
    }
}

impl ExtractionBackend for Backend {
    type Error = LlmError;

    async fn complete(
        &self,
        system_instructions: &str,
        user_content: &str,
        contract: &ResponseContract,
    ) -> Result<String, Self::Error> {
        match self {
            Backend::OpenAi(b) => b.complete(system_instructions, user_content, contract).await,
            Backend::Ollama(b) => b.complete(system_instructions, user_content, contract).await,
            Backend::Mock(b) => b.complete(system_instructions, user_content, contract).await,
        }
    }

    fn model_name(&self) -> &str {
        match self {
            Backend::OpenAi(b) => b.model_name(),
            Backend::Ollama(b) => b.model_name(),
            Backend::Mock(b) => b.model_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_from_config() {
        let config = BackendConfig {
            provider: Provider::Mock,
            ..BackendConfig::default()
        };
        let backend = Backend::from_config(&config).unwrap();
        assert_eq!(backend.provider_name(), "mock");
        assert_eq!(backend.model_name(), "mock");
    }

    #[test]
    fn test_ollama_uses_configured_model() {
        let config = BackendConfig {
            provider: Provider::Ollama,
            model: "llama3.1".to_string(),
            ..BackendConfig::default()
        };
        let backend = Backend::from_config(&config).unwrap();
        assert_eq!(backend.model_name(), "llama3.1");
    }

    #[test]
    fn test_openai_requires_key() {
        let config = BackendConfig {
            provider: Provider::OpenAi,
            api_key_env: "DATASCOUT_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..BackendConfig::default()
        };
        let result = Backend::from_config(&config);
        assert!(matches!(result, Err(LlmError::MissingApiKey(_))));
    }

    #[tokio::test]
    async fn test_mock_forwards_calls() {
        let config = BackendConfig {
            provider: Provider::Mock,
            ..BackendConfig::default()
        };
        let backend = Backend::from_config(&config).unwrap();
        let contract = ResponseContract::new(datascout_domain::ExtractionTask::Domain, "{}");

        let answer = backend.complete("sys", "user", &contract).await.unwrap();
        assert_eq!(answer, r#"{"domain": []}"#);
    }
}
