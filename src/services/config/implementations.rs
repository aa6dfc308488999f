// 設定管理の具象実装

use crate::core::{PipelineConfig, PipelineError, PipelineResult, ShutdownPolicy};
use chrono::Datelike;

/// デフォルトのキュー容量
pub const DEFAULT_BUFFER_CAPACITY: usize = 15;
/// デフォルトのフィルタ閾値
pub const DEFAULT_FILTER_THRESHOLD: i32 = 26;
/// 走行距離をこの単位ごとに経年値1として換算
pub const DEFAULT_MILEAGE_UNIT: f64 = 20_000.0;

/// デフォルト設定実装
#[derive(Debug, Clone)]
pub struct DefaultPipelineConfig {
    worker_count: usize,
    buffer_capacity: usize,
    filter_threshold: i32,
    current_year: i32,
    mileage_unit: f64,
    shutdown_policy: ShutdownPolicy,
    enable_progress: bool,
}

impl DefaultPipelineConfig {
    pub fn new(cpu_count: usize) -> Self {
        Self {
            worker_count: cpu_count.max(1),
            ..Self::default()
        }
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    pub fn with_filter_threshold(mut self, filter_threshold: i32) -> Self {
        self.filter_threshold = filter_threshold;
        self
    }

    pub fn with_current_year(mut self, current_year: i32) -> Self {
        self.current_year = current_year;
        self
    }

    pub fn with_mileage_unit(mut self, mileage_unit: f64) -> Self {
        self.mileage_unit = mileage_unit;
        self
    }

    pub fn with_shutdown_policy(mut self, shutdown_policy: ShutdownPolicy) -> Self {
        self.shutdown_policy = shutdown_policy;
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }
}

impl Default for DefaultPipelineConfig {
    fn default() -> Self {
        Self {
            worker_count: num_cpus::get().max(1),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            filter_threshold: DEFAULT_FILTER_THRESHOLD,
            current_year: chrono::Local::now().year(),
            mileage_unit: DEFAULT_MILEAGE_UNIT,
            shutdown_policy: ShutdownPolicy::default(),
            enable_progress: true,
        }
    }
}

impl PipelineConfig for DefaultPipelineConfig {
    fn worker_count(&self) -> usize {
        self.worker_count
    }

    fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    fn filter_threshold(&self) -> i32 {
        self.filter_threshold
    }

    fn current_year(&self) -> i32 {
        self.current_year
    }

    fn mileage_unit(&self) -> f64 {
        self.mileage_unit
    }

    fn shutdown_policy(&self) -> ShutdownPolicy {
        self.shutdown_policy
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}

/// 起動前の設定検証
///
/// ワーカー数・キュー容量が0の構成は実行時のデッドロックではなくここで拒否する。
pub fn validate_config<C: PipelineConfig + ?Sized>(config: &C) -> PipelineResult<()> {
    if config.worker_count() == 0 {
        return Err(PipelineError::configuration(
            "worker_count",
            "ワーカー数は1以上である必要があります",
        ));
    }

    if config.buffer_capacity() == 0 {
        return Err(PipelineError::configuration(
            "buffer_capacity",
            "キュー容量は1以上である必要があります",
        ));
    }

    let unit = config.mileage_unit();
    if !unit.is_finite() || unit <= 0.0 {
        return Err(PipelineError::configuration(
            "mileage_unit",
            format!("正の有限値である必要があります: {unit}"),
        ));
    }

    Ok(())
}
