use crate::core::{PipelineConfig, PipelineSummary, ProgressReporter, ShutdownPolicy};
use crate::engine::PipelineEngine;
use crate::report::{write_report, ReportFormat};
use crate::services::{ConsoleProgressReporter, DefaultPipelineConfig, NoOpProgressReporter};
use crate::storage::JsonFileSource;
use anyhow::Result;
use std::path::PathBuf;

/// Configuration struct for run command to reduce argument count
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub workers: Option<usize>,
    pub capacity: usize,
    pub threshold: i32,
    pub year: Option<i32>,
    pub mileage_unit: f64,
    pub shutdown: ShutdownPolicy,
    pub format: ReportFormat,
    pub quiet: bool,
}

impl RunConfig {
    /// CLI引数からパイプライン設定を構築
    pub fn pipeline_config(&self) -> DefaultPipelineConfig {
        let mut config = DefaultPipelineConfig::default()
            .with_buffer_capacity(self.capacity)
            .with_filter_threshold(self.threshold)
            .with_mileage_unit(self.mileage_unit)
            .with_shutdown_policy(self.shutdown)
            .with_progress_reporting(!self.quiet);

        if let Some(workers) = self.workers {
            config = config.with_worker_count(workers);
        }
        if let Some(year) = self.year {
            config = config.with_current_year(year);
        }
        config
    }
}

/// Rate, filter and sort the records of a JSON file, then write the report
pub async fn execute_run(config: RunConfig) -> Result<PipelineSummary> {
    // Validate input file
    if !config.input.is_file() {
        anyhow::bail!("Input file does not exist: {}", config.input.display());
    }

    let pipeline_config = config.pipeline_config();
    if config.quiet {
        run_with_reporter(&config, pipeline_config, NoOpProgressReporter::new()).await
    } else {
        run_with_reporter(&config, pipeline_config, ConsoleProgressReporter::new()).await
    }
}

async fn run_with_reporter<R>(
    config: &RunConfig,
    pipeline_config: DefaultPipelineConfig,
    reporter: R,
) -> Result<PipelineSummary>
where
    R: ProgressReporter + 'static,
{
    let engine = PipelineEngine::new(JsonFileSource::new(), pipeline_config, reporter)?;

    if !config.quiet {
        println!("🚗 車両レコード処理開始");
        println!("   - 入力ファイル: {}", config.input.display());
        println!("   - 出力ファイル: {}", config.output.display());
        println!("⚙️  処理設定:");
        println!("   - ワーカー数: {}", engine.config().worker_count());
        println!("   - キュー容量: {}", engine.config().buffer_capacity());
        println!("   - 閾値: {}", engine.config().filter_threshold());
        println!("   - 基準年: {}", engine.config().current_year());
    }

    let input_str = config
        .input
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 path: {}", config.input.display()))?;

    let (input, outcome) = engine.process_source(input_str).await?;

    write_report(
        &config.output,
        config.format,
        &outcome.summary,
        &input,
        &outcome.results,
    )
    .await?;

    if !config.quiet {
        println!("✅ 処理完了!");
        println!("   - 入力レコード数: {}", outcome.summary.total_records);
        println!("   - 通過: {}", outcome.summary.accepted);
        println!("   - 除外: {}", outcome.summary.rejected);
        println!("   - 処理時間: {}ms", outcome.summary.elapsed_ms);
        println!("📄 結果は {} に保存されました", config.output.display());
    }

    Ok(outcome.summary)
}
