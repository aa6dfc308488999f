// PipelineEngine - 依存性注入によるパイプライン実行エンジン
// 読み込み元・設定・進捗報告をコンストラクタで受け取る

use super::pipeline::PipelineCoordinator;
use crate::{
    core::{Car, PipelineConfig, PipelineError, PipelineOutcome, PipelineResult, ProgressReporter},
    services::config::validate_config,
    storage::RecordSource,
};
use std::sync::Arc;

/// 依存性注入によるパイプライン実行エンジン
///
/// 設定は構築時に検証されるため、不正な設定のエンジンは存在しない。
pub struct PipelineEngine<S, C, R> {
    source: Arc<S>,
    config: Arc<C>,
    reporter: Arc<R>,
}

impl<S, C, R> PipelineEngine<S, C, R>
where
    S: RecordSource + 'static,
    C: PipelineConfig,
    R: ProgressReporter + 'static,
{
    /// 新しいエンジンを作成
    pub fn new(source: S, config: C, reporter: R) -> PipelineResult<Self> {
        validate_config(&config)?;
        Ok(Self {
            source: Arc::new(source),
            config: Arc::new(config),
            reporter: Arc::new(reporter),
        })
    }

    /// 読み込み元からレコードを取得して処理
    pub async fn process_source(
        &self,
        location: &str,
    ) -> PipelineResult<(Vec<Car>, PipelineOutcome)> {
        let cars = self
            .source
            .load_cars(location)
            .await
            .map_err(|e| PipelineError::input(location, e))?;
        tracing::info!(
            location,
            source = self.source.source_name(),
            records = cars.len(),
            "records loaded"
        );

        let outcome = self.process_records(cars.clone()).await?;
        Ok((cars, outcome))
    }

    /// 読み込み済みのレコード列を処理
    pub async fn process_records(&self, cars: Vec<Car>) -> PipelineResult<PipelineOutcome> {
        let coordinator = PipelineCoordinator::new(Arc::clone(&self.reporter));
        coordinator.execute(cars, self.config.as_ref()).await
    }

    /// 設定への参照を取得
    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}
