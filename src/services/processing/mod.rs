// レコード評価機能
// 経年値の計算とフィルタ判定

pub mod worker;

// 公開API
pub use worker::{evaluate_car, RatingRules};
