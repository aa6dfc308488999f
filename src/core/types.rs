// パイプラインで扱うデータ型定義

use serde::{Deserialize, Serialize};

/// 入力レコード（車両1台分）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub make: String,
    pub year: i32,
    pub mileage: f64,
}

impl Car {
    pub fn new(make: impl Into<String>, year: i32, mileage: f64) -> Self {
        Self {
            make: make.into(),
            year,
            mileage,
        }
    }

    /// 車両の経年値を計算
    ///
    /// `age = current_year - year + floor(mileage / mileage_unit)`
    ///
    /// 範囲外の値は `i32` の上下限で飽和する。上限に張り付いた経年値は
    /// どの閾値も通過しない。
    pub fn age(&self, current_year: i32, mileage_unit: f64) -> i32 {
        // f64 -> i32 の `as` は飽和変換（NaNは0）
        let mileage_years = (self.mileage / mileage_unit).floor() as i32;
        current_year
            .saturating_sub(self.year)
            .saturating_add(mileage_years)
    }
}

/// 経年値付きのレコード（集約対象）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedCar {
    pub car: Car,
    pub age: i32,
}

impl RatedCar {
    pub fn new(car: Car, age: i32) -> Self {
        Self { car, age }
    }

    /// 並び順の判定: 経年値の昇順、同値なら年式の降順
    pub fn ranks_before(&self, other: &RatedCar) -> bool {
        self.age < other.age || (self.age == other.age && self.car.year > other.car.year)
    }
}

/// キューを流れる作業単位
///
/// `EndOfInput` は入力終了を示す番兵で、実データと型レベルで区別される。
#[derive(Debug, Clone, PartialEq)]
pub enum WorkItem {
    Car(Car),
    EndOfInput,
}

impl WorkItem {
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }
}

/// 単一レコードの評価結果
#[derive(Debug, Clone, PartialEq)]
pub enum RatingOutcome {
    Accepted(RatedCar),
    Rejected { car: Car, age: i32 },
}

/// ワーカー終了時の処理件数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl WorkerReport {
    pub fn new(worker_id: usize) -> Self {
        Self {
            worker_id,
            ..Self::default()
        }
    }

    pub fn handled(&self) -> usize {
        self.accepted + self.rejected
    }
}

/// パイプライン全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub total_records: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub worker_count: usize,
    pub buffer_capacity: usize,
    pub elapsed_ms: u64,
}

/// パイプライン実行結果
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub results: Vec<RatedCar>,
    pub summary: PipelineSummary,
    pub worker_reports: Vec<WorkerReport>,
}

/// 複数ワーカーへの終了通知方式
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ShutdownPolicy {
    /// ワーカー数と同じ数の番兵を投入する
    #[default]
    SentinelPerWorker,
    /// 番兵を1つだけ投入し、受け取ったワーカーが再投入してから終了する
    Relay,
}

impl ShutdownPolicy {
    /// プロデューサーが投入する番兵の数
    pub fn sentinel_count(&self, worker_count: usize) -> usize {
        match self {
            Self::SentinelPerWorker => worker_count,
            Self::Relay => 1,
        }
    }
}
