// Producer - 入力レコード配信と終了通知

use super::queue::BoundedQueue;
use crate::core::{Car, PipelineResult, ShutdownPolicy, WorkItem};
use std::sync::Arc;

/// Producer: 全レコードを元の順序で投入し、続けて終了方式に応じた数の番兵を投入する
///
/// 戻り値は投入したレコード数（番兵を除く）。
pub fn spawn_producer(
    cars: Vec<Car>,
    queue: Arc<BoundedQueue<WorkItem>>,
    worker_count: usize,
    shutdown_policy: ShutdownPolicy,
) -> tokio::task::JoinHandle<PipelineResult<usize>> {
    tokio::spawn(async move {
        let mut sent = 0;
        for car in cars {
            // 満杯なら空きができるまで待機（バックプレッシャー）
            queue.enqueue(WorkItem::Car(car)).await?;
            sent += 1;
        }

        let sentinels = shutdown_policy.sentinel_count(worker_count);
        for _ in 0..sentinels {
            queue.enqueue(WorkItem::EndOfInput).await?;
        }
        tracing::debug!(sent, sentinels, ?shutdown_policy, "producer finished");

        Ok(sent)
    })
}
