use crate::core::Car;
use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

pub mod local;

pub use local::JsonFileSource;

/// 入力レコードの読み込み元を表すトレイト
#[automock]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// 指定された場所から全レコードを読み込む（元の順序を保持）
    async fn load_cars(&self, location: &str) -> Result<Vec<Car>>;

    /// 読み込み元の種類名
    fn source_name(&self) -> &'static str {
        "unknown"
    }
}

// RecordSource for Box<dyn RecordSource>
#[async_trait]
impl RecordSource for Box<dyn RecordSource> {
    async fn load_cars(&self, location: &str) -> Result<Vec<Car>> {
        self.as_ref().load_cars(location).await
    }

    fn source_name(&self) -> &'static str {
        self.as_ref().source_name()
    }
}
