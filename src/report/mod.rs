// レポート出力 - 入力データと結果セットの書き出し

use crate::core::{Car, PipelineError, PipelineResult, PipelineSummary, RatedCar};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::AsyncWriteExt;

const INPUT_RULE_WIDTH: usize = 42;
const OUTPUT_RULE_WIDTH: usize = 48;

/// 出力フォーマット
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// 罫線付きのテキスト表
    #[default]
    Table,
    Json,
}

/// JSONレポートの構造
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: &'a PipelineSummary,
    input: &'a [Car],
    results: &'a [RatedCar],
}

fn rule(width: usize) -> String {
    "━".repeat(width)
}

/// 入力表と結果表を並べたテキストレポートを生成
pub fn render_table(input: &[Car], results: &[RatedCar]) -> String {
    let mut lines = Vec::with_capacity(input.len() + results.len() + 12);

    lines.push(rule(INPUT_RULE_WIDTH));
    lines.push(format!("┃{:>25}{:>16}", "INPUT DATA", "┃"));
    lines.push(rule(INPUT_RULE_WIDTH));
    lines.push(format!("┃{:<13}┃{:>10}┃{:>15}┃", "Make", "Year", "Mileage"));
    lines.push(rule(INPUT_RULE_WIDTH));
    lines.extend(
        input
            .iter()
            .map(|car| format!("┃{:<13}┃{:>10}┃{:>15.2}┃", car.make, car.year, car.mileage)),
    );
    lines.push(rule(INPUT_RULE_WIDTH));
    // 2つの表の間の空行
    lines.push(String::new());

    lines.push(rule(OUTPUT_RULE_WIDTH));
    lines.push(format!("┃{:>29}{:>18}", "OUTPUT DATA", "┃"));
    lines.push(rule(OUTPUT_RULE_WIDTH));
    lines.push(format!(
        "┃{:<13}┃{:>10}┃{:>15}┃{:>5}┃",
        "Make", "Year", "Mileage", "Age"
    ));
    lines.push(rule(OUTPUT_RULE_WIDTH));
    lines.extend(results.iter().map(|rated| {
        format!(
            "┃{:<13}┃{:>10}┃{:>15.2}┃{:>5}┃",
            rated.car.make, rated.car.year, rated.car.mileage, rated.age
        )
    }));
    lines.push(rule(OUTPUT_RULE_WIDTH));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// サマリー・入力・結果をまとめたJSONレポートを生成
pub fn render_json(
    summary: &PipelineSummary,
    input: &[Car],
    results: &[RatedCar],
) -> PipelineResult<String> {
    let report = JsonReport {
        summary,
        input,
        results,
    };
    serde_json::to_string_pretty(&report)
        .context("JSONレポートのシリアライズに失敗しました")
        .map_err(PipelineError::internal)
}

/// 指定フォーマットでレポートをファイルへ書き出す
///
/// 親ディレクトリが存在しない場合は作成する。既存ファイルは上書きされる。
pub async fn write_report(
    path: &Path,
    format: ReportFormat,
    summary: &PipelineSummary,
    input: &[Car],
    results: &[RatedCar],
) -> PipelineResult<()> {
    let content = match format {
        ReportFormat::Table => render_table(input, results),
        ReportFormat::Json => render_json(summary, input, results)?,
    };

    write_file(path, content.as_bytes())
        .await
        .map_err(|e| PipelineError::report(path.display().to_string(), e))?;

    tracing::debug!(path = %path.display(), ?format, bytes = content.len(), "report written");
    Ok(())
}

async fn write_file(path: &Path, content: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("ディレクトリ作成エラー: {}", parent.display()))?;
    }

    let mut file = tokio::fs::File::create(path)
        .await
        .context("ファイル作成エラー")?;
    file.write_all(content).await.context("書き込みエラー")?;
    file.flush().await.context("書き込みエラー")?;
    Ok(())
}
