// 結果集約機能
// ワーカーから届く評価済みレコードを整列済みで保持する

pub mod sorted_results;

// 公開API
pub use sorted_results::ResultAggregator;
