// パイプラインのトレイト定義
// 設定・進捗報告・結果集約の抽象化インターフェース

use super::error::PipelineResult;
use super::types::{Car, RatedCar, ShutdownPolicy};
use async_trait::async_trait;
use mockall::automock;

/// パイプライン設定を抽象化するトレイト
#[automock]
pub trait PipelineConfig: Send + Sync {
    /// ワーカータスク数を取得
    fn worker_count(&self) -> usize;

    /// 有界キューの容量を取得
    fn buffer_capacity(&self) -> usize;

    /// 経年値のフィルタ閾値（この値未満のみ通過）
    fn filter_threshold(&self) -> i32;

    /// 経年値計算の基準年
    fn current_year(&self) -> i32;

    /// 走行距離を経年値へ換算する単位
    fn mileage_unit(&self) -> f64;

    /// 終了通知方式
    fn shutdown_policy(&self) -> ShutdownPolicy;

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

// PipelineConfig for Box<dyn PipelineConfig>
impl PipelineConfig for Box<dyn PipelineConfig> {
    fn worker_count(&self) -> usize {
        self.as_ref().worker_count()
    }

    fn buffer_capacity(&self) -> usize {
        self.as_ref().buffer_capacity()
    }

    fn filter_threshold(&self) -> i32 {
        self.as_ref().filter_threshold()
    }

    fn current_year(&self) -> i32 {
        self.as_ref().current_year()
    }

    fn mileage_unit(&self) -> f64 {
        self.as_ref().mileage_unit()
    }

    fn shutdown_policy(&self) -> ShutdownPolicy {
        self.as_ref().shutdown_policy()
    }

    fn enable_progress_reporting(&self) -> bool {
        self.as_ref().enable_progress_reporting()
    }
}

/// 進捗報告の抽象化トレイト
#[automock]
#[async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_records: usize, worker_count: usize);

    /// 進捗更新の報告
    async fn report_progress(&self, completed: usize, total: usize);

    /// フィルタで除外されたレコードの報告
    async fn report_rejected(&self, car: &Car, age: i32);

    /// 処理完了時の報告
    async fn report_completed(&self, accepted: usize, rejected: usize);
}

// ProgressReporter for Box<dyn ProgressReporter>
#[async_trait]
impl ProgressReporter for Box<dyn ProgressReporter> {
    async fn report_started(&self, total_records: usize, worker_count: usize) {
        self.as_ref().report_started(total_records, worker_count).await
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        self.as_ref().report_progress(completed, total).await
    }

    async fn report_rejected(&self, car: &Car, age: i32) {
        self.as_ref().report_rejected(car, age).await
    }

    async fn report_completed(&self, accepted: usize, rejected: usize) {
        self.as_ref().report_completed(accepted, rejected).await
    }
}

/// ワーカーが評価済みレコードを渡す先
///
/// 実装は任意のワーカーから同時に呼ばれても安全でなければならない。
#[automock]
pub trait ResultSink: Send + Sync {
    fn insert(&self, rated: RatedCar) -> PipelineResult<()>;
}
