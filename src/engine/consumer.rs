// Consumer - 並列ワーカー機能

use super::queue::BoundedQueue;
use crate::{
    core::{
        PipelineResult, ProgressReporter, RatingOutcome, ResultSink, ShutdownPolicy, WorkItem,
        WorkerReport,
    },
    services::processing::{evaluate_car, RatingRules},
};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// ワーカー間で共有する依存関係
pub struct WorkerContext<S, R> {
    pub queue: Arc<BoundedQueue<WorkItem>>,
    pub sink: Arc<S>,
    pub reporter: Arc<R>,
    pub rules: RatingRules,
    pub shutdown_policy: ShutdownPolicy,
    pub progress_enabled: bool,
    /// 全ワーカー合計の処理済み件数
    pub completed: Arc<AtomicUsize>,
    pub total_records: usize,
}

// S, R自体はCloneでなくてよい
impl<S, R> Clone for WorkerContext<S, R> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            sink: Arc::clone(&self.sink),
            reporter: Arc::clone(&self.reporter),
            rules: self.rules,
            shutdown_policy: self.shutdown_policy,
            progress_enabled: self.progress_enabled,
            completed: Arc::clone(&self.completed),
            total_records: self.total_records,
        }
    }
}

/// 単一ワーカー
///
/// 番兵を受け取るまでキューから取り出し続ける。リレー方式では番兵を
/// 再投入してから終了し、次のワーカーへ終了通知を引き継ぐ。
pub fn spawn_single_worker<S, R>(
    worker_id: usize,
    ctx: WorkerContext<S, R>,
) -> tokio::task::JoinHandle<PipelineResult<WorkerReport>>
where
    S: ResultSink + 'static,
    R: ProgressReporter + 'static,
{
    tokio::spawn(async move {
        let result = run_worker(worker_id, &ctx).await;
        if let Err(error) = &result {
            // 他のワーカーとプロデューサーが永久に待機しないようキューを閉じる
            tracing::warn!(worker_id, %error, "worker failed, closing queue");
            ctx.queue.close();
        }
        result
    })
}

async fn run_worker<S, R>(
    worker_id: usize,
    ctx: &WorkerContext<S, R>,
) -> PipelineResult<WorkerReport>
where
    S: ResultSink,
    R: ProgressReporter,
{
    let mut report = WorkerReport::new(worker_id);
    tracing::debug!(worker_id, "worker started");

    loop {
        let car = match ctx.queue.dequeue().await? {
            WorkItem::Car(car) => car,
            WorkItem::EndOfInput => {
                if ctx.shutdown_policy == ShutdownPolicy::Relay {
                    ctx.queue.enqueue(WorkItem::EndOfInput).await?;
                }
                break;
            }
        };

        match evaluate_car(car, &ctx.rules) {
            RatingOutcome::Accepted(rated) => {
                tracing::trace!(worker_id, make = %rated.car.make, age = rated.age, "accepted");
                ctx.sink.insert(rated)?;
                report.accepted += 1;
            }
            RatingOutcome::Rejected { car, age } => {
                if ctx.progress_enabled {
                    ctx.reporter.report_rejected(&car, age).await;
                }
                report.rejected += 1;
            }
        }

        let completed = ctx.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if ctx.progress_enabled {
            ctx.reporter
                .report_progress(completed, ctx.total_records)
                .await;
        }
    }

    tracing::debug!(
        worker_id,
        accepted = report.accepted,
        rejected = report.rejected,
        "worker finished"
    );
    Ok(report)
}

/// WorkerPool: 同一ループを実行するワーカーをN個起動
pub fn spawn_workers<S, R>(
    worker_count: usize,
    ctx: WorkerContext<S, R>,
) -> Vec<tokio::task::JoinHandle<PipelineResult<WorkerReport>>>
where
    S: ResultSink + 'static,
    R: ProgressReporter + 'static,
{
    (0..worker_count)
        .map(|worker_id| spawn_single_worker(worker_id, ctx.clone()))
        .collect()
}
