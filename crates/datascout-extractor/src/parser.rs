//! Parse and validate backend answers against the task contract

use crate::error::ExtractorError;
use datascout_domain::{DatasetCandidate, ExtractionTask, TaskRecord};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Record shape required by every task contract
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContractRecord {
    dataset_name: String,
    value: String,
}

/// Parse a backend answer into the task's records
///
/// The answer must be a JSON object whose only key is the task name, holding
/// an array of `{dataset_name, value}` objects with no other properties.
/// Any deviation fails the whole answer.
pub fn parse_task_response(
    task: ExtractionTask,
    response: &str,
) -> Result<Vec<TaskRecord>, ExtractorError> {
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ExtractorError::InvalidFormat(format!("JSON parse error: {}", e)))?;

    let violation = |reason: String| ExtractorError::ContractViolation { task, reason };

    let object = json
        .as_object()
        .ok_or_else(|| violation("expected a JSON object".to_string()))?;

    if let Some(extra) = object.keys().find(|k| k.as_str() != task.as_str()) {
        return Err(violation(format!("unexpected top-level property '{}'", extra)));
    }

    let items = object
        .get(task.as_str())
        .ok_or_else(|| violation(format!("missing property '{}'", task.as_str())))?
        .as_array()
        .ok_or_else(|| violation(format!("'{}' is not an array", task.as_str())))?;

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        let record = ContractRecord::deserialize(item)
            .map_err(|e| violation(format!("record {}: {}", idx, e)))?;
        records.push(TaskRecord::new(record.dataset_name, record.value));
    }

    debug!("Parsed {} '{}' records", records.len(), task);
    Ok(records)
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.is_empty() {
        return Err(ExtractorError::InvalidFormat("Empty response".to_string()));
    }

    // Local models sometimes wrap JSON in markdown code blocks
    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip first line (```json or ```) and a closing ``` line
        let end = if lines[lines.len() - 1].trim() == "```" {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Turn a `dataset_name` record into a registry candidate
///
/// The record's value is expected to hold a JSON object with `authors` and
/// `doi_or_link` (legacy key `doi`). Missing or `null` fields read as empty.
/// A value that is not a JSON object at all is taken as the author string
/// with no identifier.
pub fn decode_candidate(record: &TaskRecord) -> DatasetCandidate {
    let value = record.value.trim();

    let (authors, doi_or_link) = match serde_json::from_str::<Value>(value) {
        Ok(Value::Object(fields)) => (
            reference_field(&fields, &["authors"]),
            reference_field(&fields, &["doi_or_link", "doi"]),
        ),
        _ => {
            debug!(
                "Value for dataset '{}' is not a reference object, using it as authors",
                record.dataset_name
            );
            (value.to_string(), String::new())
        }
    };

    DatasetCandidate::new(record.dataset_name.trim(), authors.trim(), doi_or_link.trim())
}

/// First non-null field among `keys`, rendered as text
fn reference_field(fields: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|v| !v.is_null())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect::<Vec<_>>()
                .join(", "),
            other => other.to_string(),
        })
        .unwrap_or_default()
}
