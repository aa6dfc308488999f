// 高レベル公開API
// PipelineEngineを簡単に使用できるようにするための便利な関数

use super::{pipeline::PipelineCoordinator, PipelineEngine};
use crate::{
    core::{Car, PipelineResult, RatedCar},
    services::{ConsoleProgressReporter, DefaultPipelineConfig, NoOpProgressReporter},
    storage::JsonFileSource,
};
use std::sync::Arc;

/// レコード列を並列処理し、閾値未満のレコードを整列済みで返す
///
/// 進捗報告なし・既定の走行距離単位での実行。戻り値は年齢昇順、
/// 同年齢なら製造年の降順。
pub async fn run(
    records: Vec<Car>,
    worker_count: usize,
    buffer_capacity: usize,
    filter_threshold: i32,
    current_year: i32,
) -> PipelineResult<Vec<RatedCar>> {
    let config = DefaultPipelineConfig::default()
        .with_worker_count(worker_count)
        .with_buffer_capacity(buffer_capacity)
        .with_filter_threshold(filter_threshold)
        .with_current_year(current_year)
        .with_progress_reporting(false);

    let coordinator = PipelineCoordinator::new(Arc::new(NoOpProgressReporter::new()));
    let outcome = coordinator.execute(records, &config).await?;
    Ok(outcome.results)
}

/// PipelineEngine作成のヘルパー関数
///
/// JSONファイル入力・コンソール進捗報告のエンジンを作成
pub fn create_default_engine(
    config: DefaultPipelineConfig,
) -> PipelineResult<PipelineEngine<JsonFileSource, DefaultPipelineConfig, ConsoleProgressReporter>>
{
    PipelineEngine::new(JsonFileSource::new(), config, ConsoleProgressReporter::new())
}

/// PipelineEngine作成のヘルパー関数（静音版）
pub fn create_quiet_engine(
    config: DefaultPipelineConfig,
) -> PipelineResult<PipelineEngine<JsonFileSource, DefaultPipelineConfig, NoOpProgressReporter>> {
    PipelineEngine::new(JsonFileSource::new(), config, NoOpProgressReporter::new())
}
