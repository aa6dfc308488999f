// エンジン層 - 並列処理とオーケストレーション
// サービス層を組み合わせて高レベルな処理を提供

pub mod api;
pub mod consumer;
pub mod pipeline;
pub mod processing_engine;
pub mod producer;
pub mod queue;

// 公開API - 主要エンジンクラス
pub use api::{create_default_engine, create_quiet_engine, run};
pub use pipeline::PipelineCoordinator;
pub use processing_engine::PipelineEngine;
pub use queue::BoundedQueue;
