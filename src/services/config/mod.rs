// 設定管理機能

pub mod implementations;

// 公開API
pub use implementations::{
    validate_config, DefaultPipelineConfig, DEFAULT_BUFFER_CAPACITY, DEFAULT_FILTER_THRESHOLD,
    DEFAULT_MILEAGE_UNIT,
};
