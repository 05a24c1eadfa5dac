//! LLM prompt engineering for per-task extraction

use crate::error::ExtractorError;
use crate::types::Paper;
use datascout_domain::{DatasetEntry, ExtractionTask, ResponseContract};
use serde_json::json;

/// Builds instructions, response contracts and request bodies for each task
///
/// The `dataset_name` instructions embed a snapshot of the registry so the
/// backend can line mentions up with known datasets; authoritative matching
/// still happens in the registry afterwards.
pub struct PromptBuilder {
    registry_snapshot: Vec<DatasetEntry>,
}

impl PromptBuilder {
    /// Create a prompt builder with an empty registry snapshot
    pub fn new() -> Self {
        Self {
            registry_snapshot: Vec::new(),
        }
    }

    /// Use these registry entries as the matching hint
    pub fn with_registry(mut self, entries: &[DatasetEntry], limit: usize) -> Self {
        let take = if limit == 0 { entries.len() } else { limit };
        self.registry_snapshot = entries.iter().take(take).cloned().collect();
        self
    }

    /// Build the system instructions for a task
    pub fn build_instructions(&self, task: ExtractionTask) -> String {
        let mut prompt = String::new();

        prompt.push_str(task_template(task));
        prompt.push_str("\n\n");

        if task == ExtractionTask::DatasetName {
            prompt.push_str(DATASET_VALUE_FORMAT);
            prompt.push_str("\n\n");
            prompt.push_str("Known datasets (reuse these names when a mention refers to one of them):\n");
            prompt.push_str(&self.registry_hint());
            prompt.push_str("\n\n");
        }

        prompt.push_str(&format!(
            "Return a JSON object with a single key \"{task}\" whose value is an array of \
             {{\"dataset_name\": string, \"value\": string}} records, one per dataset per paper. \
             Use an empty array when nothing applies. No other keys, no explanations."
        ));

        prompt
    }

    /// Build the system instructions for a task given by name
    pub fn build_instructions_for(&self, task_name: &str) -> Result<String, ExtractorError> {
        let task = task_name.parse::<ExtractionTask>()?;
        Ok(self.build_instructions(task))
    }

    /// Build the response contract for a task
    pub fn build_response_contract(&self, task: ExtractionTask) -> ResponseContract {
        let name = task.as_str();
        let schema = json!({
            "type": "object",
            "properties": {
                name: {
                    "type": "array",
                    "description": format!("List of {} for the paper", name),
                    "items": {
                        "type": "object",
                        "properties": {
                            "dataset_name": { "type": "string" },
                            "value": { "type": "string" }
                        },
                        "required": ["dataset_name", "value"],
                        "additionalProperties": false
                    }
                }
            },
            "required": [name],
            "additionalProperties": false
        });

        ResponseContract::new(task, schema.to_string())
    }

    /// Build the combined request body: one task-labelled excerpt per paper
    pub fn build_user_content(&self, task: ExtractionTask, papers: &[Paper]) -> String {
        let mut content = String::new();
        for (idx, paper) in papers.iter().enumerate() {
            content.push_str(&format!(
                "--- Paper {} of {}: {} ---\nProcess this cybersecurity paper for {}:\n",
                idx + 1,
                papers.len(),
                paper.name,
                task
            ));
            content.push_str(&paper.text);
            content.push('\n');
        }
        content
    }

    fn registry_hint(&self) -> String {
        // Vec<DatasetEntry> always serializes
        serde_json::to_string_pretty(&self.registry_snapshot).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn task_template(task: ExtractionTask) -> &'static str {
    match task {
        ExtractionTask::Domain => DOMAIN_INSTRUCTIONS,
        ExtractionTask::DatasetName => DATASET_NAME_INSTRUCTIONS,
        ExtractionTask::SubDomain => SUB_DOMAIN_INSTRUCTIONS,
        ExtractionTask::DatasetUsage => DATASET_USAGE_INSTRUCTIONS,
        ExtractionTask::DatasetType => DATASET_TYPE_INSTRUCTIONS,
        ExtractionTask::LabelingType => LABELING_TYPE_INSTRUCTIONS,
        ExtractionTask::Availability => AVAILABILITY_INSTRUCTIONS,
    }
}

const DOMAIN_INSTRUCTIONS: &str = r#"You are identifying the research domain of cybersecurity papers.
For each paper, report the research domain (e.g. IoT, network traffic, malware, APT, network intrusion).
Pair the domain with every dataset the paper uses; set "value" to the domain."#;

const DATASET_NAME_INSTRUCTIONS: &str = r#"You are extracting the datasets used in cybersecurity research papers.
For each dataset a paper uses, report its name, its authors and its DOI or link."#;

const DATASET_VALUE_FORMAT: &str = r#"Set "dataset_name" to the dataset name and "value" to a JSON object encoded as a string:
{"authors": "AUTHOR_STRING", "doi_or_link": "DOI_OR_LINK"}
Use empty strings for authors or DOI/link the paper does not give."#;

const SUB_DOMAIN_INSTRUCTIONS: &str = r#"For each dataset used in the papers, identify the sub-domains or the specific attacks and vulnerabilities it covers.
Set "value" to a short comma-separated list."#;

const DATASET_USAGE_INSTRUCTIONS: &str = r#"For each dataset used in the papers, state how much of it the research used (the full dataset, or a specific sampled portion with its percentage when given).
Set "value" to that description."#;

const DATASET_TYPE_INSTRUCTIONS: &str = r#"For each dataset used in the papers, state whether the data is realistic, synthetic or hybrid.
Set "value" to one of: realistic, synthetic, hybrid."#;

const LABELING_TYPE_INSTRUCTIONS: &str = r#"For each dataset used in the papers, state whether it is labeled, unlabeled or a hybrid of both.
Set "value" to one of: labeled, unlabeled, hybrid."#;

const AVAILABILITY_INSTRUCTIONS: &str = r#"For each dataset used in the papers, identify its availability: public, proprietary, restricted, or custom (created just for this research and never shared).
Set "value" to one of: public, proprietary, restricted, custom."#;
