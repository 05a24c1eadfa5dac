//! Integration tests for the Orchestrator

#[cfg(test)]
mod tests {
    use crate::{load_papers, ExtractorConfig, ExtractorError, Orchestrator, Paper};
    use datascout_documents::TextFolderSource;
    use datascout_domain::{DatasetId, ExtractionTask};
    use datascout_llm::MockBackend;
    use datascout_registry::{DatasetRegistry, JsonRegistryFile};

    const NSL_KDD_ANSWER: &str = r#"{"dataset_name": [
        {"dataset_name": "NSL-KDD", "value": "{\"authors\": \"GhulamMohi-ud-din\", \"doi_or_link\": \"https://dx.doi.org/10.21227/425a-3e55\"}"}
    ]}"#;

    const NEW_DATASET_ANSWER: &str = r#"{"dataset_name": [
        {"dataset_name": "CIC-DDoS2019", "value": "{\"authors\": \"Sharafaldin et al.\", \"doi_or_link\": \"https://www.unb.ca/cic/datasets/ddos-2019.html\"}"}
    ]}"#;

    fn papers() -> Vec<Paper> {
        vec![
            Paper::new("first.pdf", "Intrusion detection evaluated on NSL-KDD."),
            Paper::new("second.pdf", "A DDoS study using CIC-DDoS2019."),
        ]
    }

    #[tokio::test]
    async fn test_known_dataset_matches_existing_entry() {
        let mut backend = MockBackend::default();
        backend.add_response(ExtractionTask::DatasetName, NSL_KDD_ANSWER);
        let orchestrator = Orchestrator::new(backend, ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        let records = report.records(ExtractionTask::DatasetName).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].unique_id, Some(DatasetId::new(2)));
        assert_eq!(registry.len(), 5);
        assert!(report.new_dataset_ids().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_dataset_is_registered() {
        let mut backend = MockBackend::default();
        backend.add_response(ExtractionTask::DatasetName, NEW_DATASET_ANSWER);
        let orchestrator = Orchestrator::new(backend, ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        assert_eq!(registry.len(), 6);
        let entry = registry.get(DatasetId::new(6)).unwrap();
        assert_eq!(entry.dataset_name, "CIC-DDoS2019");
        assert_eq!(entry.authors, "Sharafaldin et al.");
        assert_eq!(report.new_dataset_ids(), vec![DatasetId::new(6)]);
    }

    #[tokio::test]
    async fn test_repeat_run_is_idempotent() {
        let mut backend = MockBackend::default();
        backend.add_response(ExtractionTask::DatasetName, NEW_DATASET_ANSWER);
        let orchestrator = Orchestrator::new(backend, ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        orchestrator.run(&papers(), &mut registry).await;
        let second = orchestrator.run(&papers(), &mut registry).await;

        assert_eq!(registry.len(), 6);
        assert!(second.new_dataset_ids().is_empty());
        let records = second.records(ExtractionTask::DatasetName).unwrap();
        assert_eq!(records[0].unique_id, Some(DatasetId::new(6)));
    }

    #[tokio::test]
    async fn test_failed_task_does_not_stop_run() {
        let mut backend = MockBackend::default();
        backend.add_response(
            ExtractionTask::Domain,
            r#"{"domain": [{"dataset_name": "NSL-KDD", "value": "network intrusion detection"}]}"#,
        );
        backend.add_error(ExtractionTask::DatasetUsage, "service unavailable");
        backend.add_response(ExtractionTask::DatasetName, NEW_DATASET_ANSWER);
        let orchestrator = Orchestrator::new(backend.clone(), ExtractorConfig::default()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        assert_eq!(backend.call_count(), 7);
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].task, ExtractionTask::DatasetUsage);
        assert!(failures[0].reason.contains("service unavailable"));

        let domain = report.records(ExtractionTask::Domain).unwrap();
        assert_eq!(domain[0].value, "network intrusion detection");
        assert_eq!(registry.len(), 6);
    }

    #[tokio::test]
    async fn test_contract_violation_fails_only_that_task() {
        let mut backend = MockBackend::default();
        backend.add_response(ExtractionTask::DatasetType, r#"{"wrong_key": []}"#);
        backend.add_response(ExtractionTask::DatasetName, "This is not JSON");
        let orchestrator = Orchestrator::new(backend, ExtractorConfig::default()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        let failed: Vec<_> = report.failures().iter().map(|f| f.task).collect();
        assert_eq!(failed, vec![ExtractionTask::DatasetName, ExtractionTask::DatasetType]);
        assert_eq!(report.succeeded().count(), 5);
        assert_eq!(registry.len(), 5);
    }

    #[tokio::test]
    async fn test_every_paper_sent_with_each_task() {
        let backend = MockBackend::default();
        let config = ExtractorConfig::default()
            .with_tasks(vec![ExtractionTask::DatasetName, ExtractionTask::SubDomain]);
        let orchestrator = Orchestrator::new(backend.clone(), config).unwrap();
        let mut registry = DatasetRegistry::seeded();

        orchestrator.run(&papers(), &mut registry).await;

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        for call in &calls {
            assert!(call.user_content.contains("first.pdf"));
            assert!(call.user_content.contains("second.pdf"));
        }
        assert!(calls[0].system_instructions.contains("NSL-KDD"));
    }

    #[tokio::test]
    async fn test_later_task_sees_new_registry_entries() {
        let mut backend = MockBackend::default();
        backend.add_response(ExtractionTask::DatasetName, NEW_DATASET_ANSWER);
        let orchestrator = Orchestrator::new(backend.clone(), ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        orchestrator.run(&papers(), &mut registry).await;
        backend.reset_calls();
        orchestrator.run(&papers(), &mut registry).await;

        assert!(backend.calls()[0].system_instructions.contains("CIC-DDoS2019"));
    }

    #[tokio::test]
    async fn test_run_and_save_persists_registry() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonRegistryFile::new(dir.path().join("registry.json"));
        let mut backend = MockBackend::default();
        backend.add_response(ExtractionTask::DatasetName, NEW_DATASET_ANSWER);
        let orchestrator = Orchestrator::new(backend, ExtractorConfig::datasets_only()).unwrap();
        let mut registry = file.load_or_seed().unwrap();

        orchestrator.run_and_save(&papers(), &mut registry, &file).await.unwrap();

        let reloaded = file.load().unwrap();
        assert_eq!(reloaded.len(), 6);
        assert_eq!(reloaded.next_id(), DatasetId::new(7));
    }

    #[tokio::test]
    async fn test_papers_from_folder_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "Uses NSL-KDD").unwrap();
        std::fs::write(dir.path().join("b.md"), "Uses CIC-DDoS2019").unwrap();

        let papers = load_papers(&TextFolderSource::new(), dir.path(), 0).unwrap();
        assert_eq!(papers.len(), 2);

        let backend = MockBackend::default();
        let orchestrator = Orchestrator::new(backend.clone(), ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();
        let report = orchestrator.run(&papers, &mut registry).await;

        assert_eq!(report.paper_count, 2);
        assert!(backend.calls()[0].user_content.contains("Uses CIC-DDoS2019"));
    }

    #[tokio::test]
    async fn test_null_authors_still_match_by_link() {
        let mut backend = MockBackend::default();
        backend.add_response(
            ExtractionTask::DatasetName,
            r#"{"dataset_name": [
                {"dataset_name": "NSL-KDD", "value": "{\"authors\": null, \"doi_or_link\": \"https://dx.doi.org/10.21227/425a-3e55\"}"}
            ]}"#,
        );
        let orchestrator = Orchestrator::new(backend, ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        let records = report.records(ExtractionTask::DatasetName).unwrap();
        assert_eq!(records[0].unique_id, Some(DatasetId::new(2)));
        assert_eq!(registry.len(), 5);
        assert!(report.new_dataset_ids().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_mention_in_one_answer_resolves_once() {
        let mut backend = MockBackend::default();
        backend.add_response(
            ExtractionTask::DatasetName,
            r#"{"dataset_name": [
                {"dataset_name": "CIC-DDoS2019", "value": "{\"authors\": \"Sharafaldin et al.\", \"doi_or_link\": \"https://www.unb.ca/cic/datasets/ddos-2019.html\"}"},
                {"dataset_name": "CIC-DDoS2019", "value": "{\"authors\": \"Sharafaldin et al.\", \"doi_or_link\": \"https://www.unb.ca/cic/datasets/ddos-2019.html\"}"}
            ]}"#,
        );
        let orchestrator = Orchestrator::new(backend, ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        let records = report.records(ExtractionTask::DatasetName).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].unique_id, Some(DatasetId::new(6)));
        assert_eq!(records[1].unique_id, Some(DatasetId::new(6)));
        assert_eq!(registry.len(), 6);
        assert_eq!(report.new_dataset_ids(), vec![DatasetId::new(6)]);
    }

    #[tokio::test]
    async fn test_same_name_with_different_source_registers_separately() {
        let mut backend = MockBackend::default();
        backend.add_response(
            ExtractionTask::DatasetName,
            r#"{"dataset_name": [
                {"dataset_name": "NSL-KDD", "value": "{\"authors\": \"Someone Else\", \"doi_or_link\": \"https://other.org\"}"}
            ]}"#,
        );
        let orchestrator = Orchestrator::new(backend, ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        assert_eq!(registry.len(), 6);
        assert_eq!(report.new_dataset_ids(), vec![DatasetId::new(6)]);
        assert_eq!(
            registry.find_by_name("nsl-kdd").map(|e| e.unique_id),
            Some(DatasetId::new(2))
        );
        let added = registry.get(DatasetId::new(6)).unwrap();
        assert_eq!(added.dataset_name, "NSL-KDD");
        assert_eq!(added.authors, "Someone Else");
    }

    #[tokio::test]
    async fn test_empty_answer_fails_the_task() {
        let backend = MockBackend::new("");
        let orchestrator = Orchestrator::new(backend, ExtractorConfig::datasets_only()).unwrap();
        let mut registry = DatasetRegistry::seeded();

        let report = orchestrator.run(&papers(), &mut registry).await;

        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].reason.contains("Empty response"));
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_empty_folder_reports_no_documents() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_papers(&TextFolderSource::new(), dir.path(), 0);
        assert!(matches!(result, Err(ExtractorError::NoDocuments(_))));
    }
}
