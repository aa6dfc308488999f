// Pipeline - Producer-Consumer パイプライン
// キュー・ワーカー・集約のライフサイクルを順序どおりに管理する

use super::{
    consumer::{spawn_workers, WorkerContext},
    producer::spawn_producer,
    queue::BoundedQueue,
};
use crate::{
    core::{
        Car, PipelineConfig, PipelineError, PipelineOutcome, PipelineResult, PipelineSummary,
        ProgressReporter, WorkerReport,
    },
    services::{aggregation::ResultAggregator, config::validate_config, processing::RatingRules},
};
use std::sync::{atomic::AtomicUsize, Arc};
use std::time::Instant;

/// PipelineCoordinator: 起動から終了通知、結果取り出しまでを統括する
pub struct PipelineCoordinator<R> {
    reporter: Arc<R>,
}

impl<R> PipelineCoordinator<R>
where
    R: ProgressReporter + 'static,
{
    pub fn new(reporter: Arc<R>) -> Self {
        Self { reporter }
    }

    /// レコード列を処理して整列済みの結果を返す
    ///
    /// 手順は固定: キューと集約の構築 → 全ワーカー起動 → 全レコード投入 →
    /// 終了通知 → 全ワーカー終了待ち → 結果取り出し。
    pub async fn execute<C>(&self, cars: Vec<Car>, config: &C) -> PipelineResult<PipelineOutcome>
    where
        C: PipelineConfig + ?Sized,
    {
        validate_config(config)?;
        let start_time = Instant::now();

        let worker_count = config.worker_count();
        let buffer_capacity = config.buffer_capacity();
        let shutdown_policy = config.shutdown_policy();
        let progress_enabled = config.enable_progress_reporting();
        let total_records = cars.len();

        // 1. キューと集約の構築
        let queue = Arc::new(BoundedQueue::new(buffer_capacity)?);
        let aggregator = Arc::new(ResultAggregator::new(total_records));

        tracing::info!(
            total_records,
            worker_count,
            buffer_capacity,
            ?shutdown_policy,
            "pipeline started"
        );
        if progress_enabled {
            self.reporter
                .report_started(total_records, worker_count)
                .await;
        }

        // 2. データ投入より先にワーカーを起動（空キューで待機させる）
        let worker_handles = spawn_workers(
            worker_count,
            WorkerContext {
                queue: Arc::clone(&queue),
                sink: Arc::clone(&aggregator),
                reporter: Arc::clone(&self.reporter),
                rules: RatingRules::from_config(config),
                shutdown_policy,
                progress_enabled,
                completed: Arc::new(AtomicUsize::new(0)),
                total_records,
            },
        );

        // 3-4. 全レコード投入と終了通知
        let producer_handle =
            spawn_producer(cars, Arc::clone(&queue), worker_count, shutdown_policy);

        // 5. 全ワーカーの終了を待機
        let mut worker_reports = Vec::with_capacity(worker_count);
        let mut errors = Vec::new();
        for handle in worker_handles {
            match handle.await {
                Ok(Ok(report)) => worker_reports.push(report),
                Ok(Err(error)) => errors.push(error),
                Err(join_error) => {
                    // パニックしたワーカーはキューを閉じられないため、ここで閉じる
                    queue.close();
                    errors.push(PipelineError::task(join_error));
                }
            }
        }

        match producer_handle.await {
            Ok(Ok(sent)) => debug_assert_eq!(sent, total_records),
            Ok(Err(error)) => errors.push(error),
            Err(join_error) => errors.push(PipelineError::task(join_error)),
        }

        if let Some(error) = first_root_cause(errors) {
            tracing::error!(%error, "pipeline failed");
            return Err(error);
        }

        // 6. 残った番兵を回収して結果を取り出す
        let leftovers = queue.drain()?;
        queue.close();
        if leftovers.iter().any(|item| !item.is_end_of_input()) {
            return Err(PipelineError::lifecycle(
                "全ワーカー終了後にキューへ未処理のレコードが残っています",
            ));
        }

        let aggregator = Arc::try_unwrap(aggregator).map_err(|_| {
            PipelineError::lifecycle("結果セットへの参照がワーカー終了後も残っています")
        })?;
        let results = aggregator.snapshot()?;

        let summary = summarize(
            total_records,
            worker_count,
            buffer_capacity,
            &worker_reports,
            start_time,
        );
        tracing::info!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            elapsed_ms = summary.elapsed_ms,
            "pipeline finished"
        );
        if progress_enabled {
            self.reporter
                .report_completed(summary.accepted, summary.rejected)
                .await;
        }

        Ok(PipelineOutcome {
            results,
            summary,
            worker_reports,
        })
    }
}

/// キュー閉鎖による二次的な失敗より、その原因となったエラーを優先する
fn first_root_cause(errors: Vec<PipelineError>) -> Option<PipelineError> {
    let mut secondary = None;
    for error in errors {
        if matches!(error, PipelineError::QueueClosed { .. }) {
            secondary.get_or_insert(error);
        } else {
            return Some(error);
        }
    }
    secondary
}

fn summarize(
    total_records: usize,
    worker_count: usize,
    buffer_capacity: usize,
    worker_reports: &[WorkerReport],
    start_time: Instant,
) -> PipelineSummary {
    let accepted = worker_reports.iter().map(|r| r.accepted).sum();
    let rejected = worker_reports.iter().map(|r| r.rejected).sum();

    PipelineSummary {
        total_records,
        accepted,
        rejected,
        worker_count,
        buffer_capacity,
        elapsed_ms: start_time.elapsed().as_millis() as u64,
    }
}
