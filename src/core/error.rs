// パイプライン専用のカスタムエラー型定義

use thiserror::Error;

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("設定エラー: {field} - {reason}")]
    ConfigurationError { field: String, reason: String },

    #[error("キューは既に閉じられています: {operation}")]
    QueueClosed { operation: String },

    #[error("結果セットの上限を超えました: 上限 {limit}")]
    ResultOverflow { limit: usize },

    #[error("ライフサイクル違反: {message}")]
    LifecycleViolation { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },

    #[error("入力読み込みエラー: {location} - {source}")]
    InputError {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("レポート出力エラー: {path} - {source}")]
    ReportError {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("内部エラー: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl PipelineError {
    /// 設定エラーの作成
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// キュー閉鎖エラーの作成
    pub fn queue_closed(operation: impl Into<String>) -> Self {
        Self::QueueClosed {
            operation: operation.into(),
        }
    }

    pub fn result_overflow(limit: usize) -> Self {
        Self::ResultOverflow { limit }
    }

    /// ライフサイクル違反の作成
    pub fn lifecycle(message: impl Into<String>) -> Self {
        Self::LifecycleViolation {
            message: message.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// 入力エラーの作成
    pub fn input(location: impl Into<String>, source: anyhow::Error) -> Self {
        Self::InputError {
            location: location.into(),
            source,
        }
    }

    /// レポート出力エラーの作成
    pub fn report(path: impl Into<String>, source: anyhow::Error) -> Self {
        Self::ReportError {
            path: path.into(),
            source,
        }
    }

    /// 内部エラーの作成
    pub fn internal(source: anyhow::Error) -> Self {
        Self::InternalError { source }
    }

    /// ライフサイクル契約違反（プログラミングエラー）かどうか
    ///
    /// 契約違反は実行時に回復できる状態ではないため、呼び出し側は処理全体を中止する。
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::QueueClosed { .. }
                | Self::ResultOverflow { .. }
                | Self::LifecycleViolation { .. }
                | Self::InternalError { .. }
        )
    }

    /// 起動前に検出される設定エラーかどうか
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError { .. })
    }
}

/// パイプラインの結果型
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

impl From<anyhow::Error> for PipelineError {
    fn from(error: anyhow::Error) -> Self {
        PipelineError::InternalError { source: error }
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(error: tokio::task::JoinError) -> Self {
        PipelineError::TaskError { source: error }
    }
}
