use super::RecordSource;
use crate::core::Car;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;

/// ローカルのJSONファイルから車両レコードを読み込む
///
/// 入力は `[{"make": .., "year": .., "mileage": ..}, ...]` 形式の配列。
#[derive(Debug, Default, Clone)]
pub struct JsonFileSource;

impl JsonFileSource {
    pub fn new() -> Self {
        Self
    }

    /// JSON文字列をパース（ファイルI/Oなし）
    pub fn parse(content: &str) -> Result<Vec<Car>> {
        serde_json::from_str(content).context("Failed to parse car records")
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn load_cars(&self, location: &str) -> Result<Vec<Car>> {
        let path = Path::new(location);
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display()))?;

        let cars = Self::parse(&content)
            .with_context(|| format!("Invalid input file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), records = cars.len(), "input loaded");
        Ok(cars)
    }

    fn source_name(&self) -> &'static str {
        "json-file"
    }
}
