// エラーハンドリングの統合テスト
use crate::fixtures::*;
use fleet_pipeline::{
    cli::{execute_run, RunConfig},
    engine::create_quiet_engine,
    DefaultPipelineConfig, NoOpProgressReporter, PipelineEngine, PipelineError, ReportFormat,
    ShutdownPolicy,
};
use mockall::predicate::*;
use std::fs;
use tempfile::TempDir;

#[tokio::test]
async fn test_nonexistent_input_file_error() {
    let engine = create_quiet_engine(DefaultPipelineConfig::new(2)).unwrap();

    let result = engine.process_source("nonexistent_fleet.json").await;

    let error = result.unwrap_err();
    assert!(matches!(error, PipelineError::InputError { .. }));
    assert!(error.to_string().contains("nonexistent_fleet.json"));
    assert!(!error.is_contract_violation());
}

#[tokio::test]
async fn test_malformed_json_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, r#"[{"make": "Audi", "year": 2010"#).unwrap();

    let engine = create_quiet_engine(DefaultPipelineConfig::new(2)).unwrap();
    let error = engine
        .process_source(path.to_str().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(error, PipelineError::InputError { .. }));
}

#[tokio::test]
async fn test_source_error_is_wrapped_with_location() {
    let mut source = MockRecordSource::new();
    source
        .expect_load_cars()
        .with(eq("s3://fleet/cars.json"))
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("connection refused")));

    let engine = PipelineEngine::new(
        source,
        DefaultPipelineConfig::new(2),
        NoOpProgressReporter::new(),
    )
    .unwrap();

    match engine.process_source("s3://fleet/cars.json").await {
        Err(PipelineError::InputError { location, source }) => {
            assert_eq!(location, "s3://fleet/cars.json");
            assert!(source.to_string().contains("connection refused"));
        }
        other => panic!("unexpected result: {:?}", other.map(|(cars, _)| cars.len())),
    }
}

#[test]
fn test_invalid_configuration_rejected_before_start() {
    let zero_workers = create_quiet_engine(DefaultPipelineConfig::new(1).with_worker_count(0));
    assert!(matches!(zero_workers, Err(ref e) if e.is_configuration()));

    let zero_capacity = create_quiet_engine(DefaultPipelineConfig::new(1).with_buffer_capacity(0));
    assert!(matches!(zero_capacity, Err(ref e) if e.is_configuration()));

    let bad_unit = create_quiet_engine(DefaultPipelineConfig::new(1).with_mileage_unit(f64::NAN));
    assert!(matches!(bad_unit, Err(ref e) if e.is_configuration()));
}

#[tokio::test]
async fn test_run_command_reports_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let input = write_input(temp_dir.path(), "fleet.json", &sample_fleet());
    let output = temp_dir.path().join("results.txt");

    let config = RunConfig {
        input,
        output: output.clone(),
        workers: Some(0),
        capacity: 5,
        threshold: TEST_THRESHOLD,
        year: Some(TEST_YEAR),
        mileage_unit: 20_000.0,
        shutdown: ShutdownPolicy::SentinelPerWorker,
        format: ReportFormat::Table,
        quiet: true,
    };

    let error = execute_run(config).await.unwrap_err();
    let pipeline_error = error.downcast_ref::<PipelineError>().unwrap();
    assert!(pipeline_error.is_configuration());
    // 失敗時は出力ファイルを作成しない
    assert!(!output.exists());
}

#[tokio::test]
async fn test_run_command_rejects_directory_as_input() {
    let temp_dir = TempDir::new().unwrap();

    let config = RunConfig {
        input: temp_dir.path().to_path_buf(),
        output: temp_dir.path().join("results.txt"),
        workers: Some(1),
        capacity: 1,
        threshold: TEST_THRESHOLD,
        year: Some(TEST_YEAR),
        mileage_unit: 20_000.0,
        shutdown: ShutdownPolicy::Relay,
        format: ReportFormat::Json,
        quiet: true,
    };

    assert!(execute_run(config).await.is_err());
}
