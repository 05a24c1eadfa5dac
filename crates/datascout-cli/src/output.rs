//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use datascout_domain::{DatasetEntry, ExtractionTask};
use datascout_extractor::ExtractionReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format registry entries.
    pub fn format_entries(&self, entries: &[DatasetEntry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(entries)?),
            OutputFormat::Table => Ok(self.format_entries_table(entries)),
            OutputFormat::Quiet => Ok(entries
                .iter()
                .map(|e| e.unique_id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_entries_table(&self, entries: &[DatasetEntry]) -> String {
        if entries.is_empty() {
            return self.colorize("No datasets registered.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Dataset", "Authors", "DOI / Link"]);

        for entry in entries {
            builder.push_record([
                entry.unique_id.to_string(),
                entry.dataset_name.clone(),
                entry.authors.clone(),
                entry.doi_or_link.clone(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the result of a registry lookup.
    pub fn format_match(&self, name: &str, entry: Option<&DatasetEntry>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "dataset_name": name,
                "match": entry,
            }))?),
            OutputFormat::Quiet => Ok(entry.map(|e| e.unique_id.to_string()).unwrap_or_default()),
            OutputFormat::Table => Ok(match entry {
                Some(entry) => self.success(&format!(
                    "'{}' matches entry {} ({})",
                    name, entry.unique_id, entry.dataset_name
                )),
                None => self.warning(&format!("No match for '{}'", name)),
            }),
        }
    }

    /// Format a run summary.
    pub fn format_report(&self, report: &ExtractionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&report.to_document())?),
            OutputFormat::Quiet => Ok(report
                .new_dataset_ids()
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.format_report_table(report)),
        }
    }

    fn format_report_table(&self, report: &ExtractionReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Task", "Status", "Records", "Time (ms)"]);

        for outcome in &report.outcomes {
            let (status, records) = match &outcome.result {
                Ok(records) => (self.colorize("ok", "green"), records.len().to_string()),
                Err(failure) => (self.colorize(&failure.reason, "red"), "-".to_string()),
            };
            builder.push_record([
                outcome.task.to_string(),
                status,
                records,
                outcome.elapsed_ms.to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let new_ids = report.new_dataset_ids();
        let mut lines = vec![
            self.info(&format!(
                "Run {} with model '{}' over {} paper(s)",
                report.run_id, report.model_name, report.paper_count
            )),
            table.to_string(),
        ];
        if new_ids.is_empty() {
            lines.push(self.info("No new datasets registered"));
        } else {
            let ids: Vec<String> = new_ids.iter().map(|id| id.to_string()).collect();
            lines.push(self.success(&format!(
                "Registered {} new dataset(s): {}",
                new_ids.len(),
                ids.join(", ")
            )));
        }
        lines.join("\n")
    }

    /// Format the task list, optionally with each task's instructions.
    pub fn format_tasks(&self, tasks: &[(ExtractionTask, Option<String>)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<serde_json::Value> = tasks
                    .iter()
                    .map(|(task, prompt)| {
                        serde_json::json!({
                            "task": task,
                            "reconciles_datasets": task.reconciles_datasets(),
                            "instructions": prompt,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Quiet | OutputFormat::Table => {
                let mut out = Vec::new();
                for (task, prompt) in tasks {
                    out.push(self.colorize(task.as_str(), "cyan"));
                    if let Some(prompt) = prompt {
                        out.push(prompt.clone());
                        out.push(String::new());
                    }
                }
                Ok(out.join("\n"))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}
