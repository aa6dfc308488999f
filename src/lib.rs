// 車両レコードの並列評価パイプライン
//
// 有界キューを介してプロデューサーから複数ワーカーへレコードを配り、
// 閾値を通過したレコードを整列済みの結果セットへ集約する。

pub mod cli;
pub mod core;
pub mod engine;
pub mod report;
pub mod services;
pub mod storage;

pub use crate::core::{
    Car, PipelineConfig, PipelineError, PipelineOutcome, PipelineResult, PipelineSummary,
    ProgressReporter, RatedCar, ShutdownPolicy,
};
pub use engine::{run, BoundedQueue, PipelineCoordinator, PipelineEngine};
pub use report::ReportFormat;
pub use services::{ConsoleProgressReporter, DefaultPipelineConfig, NoOpProgressReporter};
pub use storage::{JsonFileSource, RecordSource};
