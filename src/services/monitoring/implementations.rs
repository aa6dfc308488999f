// 進捗監視の具象実装

use crate::core::{Car, ProgressReporter};
use async_trait::async_trait;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_records: usize, worker_count: usize) {
        if !self.quiet {
            println!("🚀 Starting pipeline: {total_records} records, {worker_count} workers...");
        }
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        if !self.quiet && total > 0 && (completed % 10 == 0 || completed == total) {
            let percentage = (completed as f64 / total as f64) * 100.0;
            println!("📊 Progress: {completed}/{total} ({percentage:.1}%)");
        }
    }

    async fn report_rejected(&self, car: &Car, age: i32) {
        if !self.quiet {
            println!("🚫 Filtered out {} ({}): age {age}", car.make, car.year);
        }
    }

    async fn report_completed(&self, accepted: usize, rejected: usize) {
        if !self.quiet {
            println!("✅ Completed! Accepted: {accepted}, Filtered out: {rejected}");
        }
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_records: usize, _worker_count: usize) {
        // 何もしない
    }

    async fn report_progress(&self, _completed: usize, _total: usize) {
        // 何もしない
    }

    async fn report_rejected(&self, _car: &Car, _age: i32) {
        // 何もしない
    }

    async fn report_completed(&self, _accepted: usize, _rejected: usize) {
        // 何もしない
    }
}
