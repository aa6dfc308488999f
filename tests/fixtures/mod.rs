// テストユーティリティ
// 入力データの生成と記録用の進捗レポーター

pub mod test_data;

// 公開API
pub use mocks::*;
pub use test_data::*;
