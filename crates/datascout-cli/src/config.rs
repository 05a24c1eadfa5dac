//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use datascout_extractor::ExtractorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Extraction backend
    #[serde(default)]
    pub backend: BackendConfig,

    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Task list and request limits
    #[serde(default)]
    pub extraction: ExtractorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Backend selection and model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Which backend to call
    #[serde(default)]
    pub provider: Provider,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Endpoint override (OpenAI base URL or Ollama server)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

/// Supported backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI chat completions with structured outputs
    #[default]
    OpenAi,
    /// Local Ollama server
    Ollama,
    /// Canned empty answers, no network
    Mock,
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Folder holding the papers
    #[serde(default = "default_papers")]
    pub papers: PathBuf,

    /// Kind of documents in the papers folder
    #[serde(default)]
    pub source: DocumentKind,

    /// Dataset registry JSON file
    #[serde(default = "default_registry")]
    pub registry: PathBuf,

    /// Per-task results JSON file
    #[serde(default = "default_results")]
    pub results: PathBuf,
}

/// Document formats a papers folder may hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF files
    #[default]
    Pdf,
    /// Plain text and Markdown files
    Text,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".datascout").join("config.toml"))
    }

    /// Load configuration from `path`, or the default location when `None`.
    ///
    /// A missing file yields the defaults. The loaded extraction settings are
    /// validated before being returned.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };

        config.extraction.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: default_model(),
            endpoint: None,
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            papers: default_papers(),
            source: DocumentKind::default(),
            registry: default_registry(),
            results: default_results(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_model() -> String {
    datascout_llm::openai::DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    datascout_llm::openai::DEFAULT_TEMPERATURE
}

fn default_papers() -> PathBuf {
    PathBuf::from("papers")
}

fn default_registry() -> PathBuf {
    PathBuf::from("datasets_updated.json")
}

fn default_results() -> PathBuf {
    PathBuf::from("extraction_results.json")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
