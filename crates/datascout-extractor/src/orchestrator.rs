//! Core extraction loop: one backend call per task over the whole paper batch

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::{decode_candidate, parse_task_response};
use crate::prompt::PromptBuilder;
use crate::types::{ExtractionReport, Paper, ReconciledDataset, TaskFailure, TaskOutcome};
use datascout_domain::traits::{ExtractionBackend, RegistrySink};
use datascout_domain::{ExtractionTask, ResponseContract, RunId, TaskRecord};
use datascout_registry::{DatasetRegistry, Reconciliation};
use std::fmt::Display;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Drives the per-task extraction loop and merges dataset mentions into the registry
///
/// Tasks run strictly one after another. A task that fails (backend error,
/// timeout, unparseable or non-conforming answer) is recorded in the report
/// and the run moves on; it never touches the registry.
pub struct Orchestrator<B>
where
    B: ExtractionBackend,
{
    backend: B,
    config: ExtractorConfig,
}

impl<B> Orchestrator<B>
where
    B: ExtractionBackend,
    B::Error: Display,
{
    /// Create a new Orchestrator, validating the configuration
    pub fn new(backend: B, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { backend, config })
    }

    /// The configured backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run the configured task list
    pub async fn run(&self, papers: &[Paper], registry: &mut DatasetRegistry) -> ExtractionReport {
        self.run_tasks(papers, &self.config.tasks, registry).await
    }

    /// Run an explicit task list, in order
    pub async fn run_tasks(
        &self,
        papers: &[Paper],
        tasks: &[ExtractionTask],
        registry: &mut DatasetRegistry,
    ) -> ExtractionReport {
        let run_id = RunId::new();
        info!(
            "Starting run {} over {} papers, {} tasks, model '{}'",
            run_id,
            papers.len(),
            tasks.len(),
            self.backend.model_name()
        );

        let mut outcomes = Vec::with_capacity(tasks.len());
        let mut reconciliations = Vec::new();

        for &task in tasks {
            info!("Processing task: {}", task);
            let started = Instant::now();

            let result = match self.run_task(task, papers, registry, &mut reconciliations).await {
                Ok(records) => {
                    info!("Task '{}' produced {} records", task, records.len());
                    Ok(records)
                }
                Err(e) => {
                    warn!("Error processing {}: {}", task, e);
                    Err(TaskFailure {
                        task,
                        reason: e.to_string(),
                    })
                }
            };

            outcomes.push(TaskOutcome {
                task,
                result,
                elapsed_ms: started.elapsed().as_millis() as u64,
            });
        }

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            "Run {} complete: {} tasks succeeded, {} failed, {} new datasets",
            run_id,
            outcomes.len() - failed,
            failed,
            reconciliations.iter().filter(|r| r.is_new).count()
        );

        ExtractionReport {
            run_id,
            model_name: self.backend.model_name().to_string(),
            paper_count: papers.len(),
            outcomes,
            reconciliations,
        }
    }

    /// Run the configured tasks, then overwrite the persisted registry
    pub async fn run_and_save<S>(
        &self,
        papers: &[Paper],
        registry: &mut DatasetRegistry,
        sink: &S,
    ) -> Result<ExtractionReport, ExtractorError>
    where
        S: RegistrySink,
        S::Error: Display,
    {
        let report = self.run(papers, registry).await;
        sink.save(registry.entries())
            .map_err(|e| ExtractorError::Persistence(e.to_string()))?;
        Ok(report)
    }

    /// Run a single task end to end
    async fn run_task(
        &self,
        task: ExtractionTask,
        papers: &[Paper],
        registry: &mut DatasetRegistry,
        reconciliations: &mut Vec<ReconciledDataset>,
    ) -> Result<Vec<TaskRecord>, ExtractorError> {
        let builder = PromptBuilder::new()
            .with_registry(registry.entries(), self.config.registry_hint_limit);

        let instructions = builder.build_instructions(task);
        let contract = builder.build_response_contract(task);
        let user_content = builder.build_user_content(task, papers);

        debug!(
            "Task '{}': instructions {} chars, request body {} chars",
            task,
            instructions.len(),
            user_content.len()
        );

        let response = self.call_backend(&instructions, &user_content, &contract).await?;

        debug!("Task '{}': response {} chars", task, response.len());

        let records = parse_task_response(task, &response)?;

        if task.reconciles_datasets() {
            Ok(reconcile_records(records, registry, reconciliations))
        } else {
            Ok(records)
        }
    }

    /// Call the backend, applying the configured timeout
    async fn call_backend(
        &self,
        instructions: &str,
        user_content: &str,
        contract: &ResponseContract,
    ) -> Result<String, ExtractorError> {
        let call = self.backend.complete(instructions, user_content, contract);

        let result = match self.config.request_timeout() {
            Some(limit) => timeout(limit, call)
                .await
                .map_err(|_| ExtractorError::Timeout(limit.as_secs()))?,
            None => call.await,
        };

        result.map_err(|e| ExtractorError::Backend(e.to_string()))
    }
}

/// Resolve every dataset record against the registry and stamp its id
///
/// Each record's match-or-register step completes before the next record is
/// looked at, so a dataset mentioned twice in one answer resolves to one id.
fn reconcile_records(
    records: Vec<TaskRecord>,
    registry: &mut DatasetRegistry,
    reconciliations: &mut Vec<ReconciledDataset>,
) -> Vec<TaskRecord> {
    let mut stamped = Vec::with_capacity(records.len());

    for record in records {
        let candidate = decode_candidate(&record);
        if !candidate.is_well_formed() {
            warn!("Skipping dataset record without a name (value: '{}')", record.value);
            continue;
        }

        let name_only = registry
            .find_by_name(&candidate.dataset_name)
            .map(|entry| entry.unique_id);

        let outcome = registry.reconcile(&candidate);
        match outcome {
            Reconciliation::Matched(id) => {
                info!(
                    "Match found for dataset '{}' with unique ID: {}",
                    candidate.dataset_name, id
                );
            }
            Reconciliation::Registered(id) => {
                if let Some(existing) = name_only {
                    warn!(
                        "Dataset '{}' shares its name with entry {} but neither authors nor link agree; registered separately",
                        candidate.dataset_name, existing
                    );
                }
                info!(
                    "Adding new dataset: {} with unique ID: {}",
                    candidate.dataset_name, id
                );
            }
        }

        reconciliations.push(ReconciledDataset {
            dataset_name: candidate.dataset_name.clone(),
            unique_id: outcome.id(),
            is_new: outcome.is_new(),
        });
        stamped.push(record.with_unique_id(outcome.id()));
    }

    stamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use datascout_domain::DatasetId;
    use datascout_llm::MockBackend;

    fn papers() -> Vec<Paper> {
        vec![Paper::new("ids.pdf", "We evaluate on NSL-KDD and CIC-DDoS2019.")]
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExtractorConfig::default().with_tasks(vec![]);
        let result = Orchestrator::new(MockBackend::default(), config);
        assert!(matches!(result, Err(ExtractorError::Config(_))));
    }

    #[tokio::test]
    async fn test_one_call_per_task() {
        let backend = MockBackend::default();
        let orchestrator = Orchestrator::new(backend.clone(), ExtractorConfig::default()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        assert_eq!(backend.call_count(), 7);
        assert_eq!(report.outcomes.len(), 7);
        assert!(report.failures().is_empty());
        let order: Vec<_> = backend.calls().iter().map(|c| c.task).collect();
        assert_eq!(order, ExtractionTask::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_reconcile_stamps_ids() {
        let mut backend = MockBackend::default();
        backend.add_response(
            ExtractionTask::DatasetName,
            r#"{"dataset_name": [
                {"dataset_name": "nsl-kdd", "value": "{\"authors\": \"GhulamMohi-ud-din\", \"doi_or_link\": \"\"}"},
                {"dataset_name": "CIC-DDoS2019", "value": "{\"authors\": \"Sharafaldin et al.\", \"doi_or_link\": \"https://example.org/x\"}"},
                {"dataset_name": "", "value": "{}"}
            ]}"#,
        );
        let orchestrator =
            Orchestrator::new(backend, ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;
        let records = report.records(ExtractionTask::DatasetName).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].unique_id, Some(DatasetId::new(2)));
        assert_eq!(records[1].unique_id, Some(DatasetId::new(6)));
        assert_eq!(registry.len(), 6);
        assert_eq!(report.new_dataset_ids(), vec![DatasetId::new(6)]);
    }

    #[tokio::test]
    async fn test_timeout_fails_task() {
        struct SlowBackend;

        impl ExtractionBackend for SlowBackend {
            type Error = String;

            async fn complete(
                &self,
                _system_instructions: &str,
                _user_content: &str,
                contract: &ResponseContract,
            ) -> Result<String, Self::Error> {
                tokio::time::sleep(std::time::Duration::from_secs(3)).await;
                Ok(format!("{{\"{}\": []}}", contract.task))
            }

            fn model_name(&self) -> &str {
                "slow"
            }
        }

        let config = ExtractorConfig {
            tasks: vec![ExtractionTask::Domain],
            request_timeout_secs: Some(1),
            ..ExtractorConfig::default()
        };
        let orchestrator = Orchestrator::new(SlowBackend, config).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].reason.contains("timed out"));
    }
}
