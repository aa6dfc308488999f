// Worker - 単一レコードの評価機能

use crate::core::{Car, PipelineConfig, RatedCar, RatingOutcome};

/// 経年値の計算とフィルタに使うパラメータ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRules {
    pub current_year: i32,
    pub mileage_unit: f64,
    pub filter_threshold: i32,
}

impl RatingRules {
    pub fn new(current_year: i32, mileage_unit: f64, filter_threshold: i32) -> Self {
        Self {
            current_year,
            mileage_unit,
            filter_threshold,
        }
    }

    /// 設定から評価ルールを取り出す
    pub fn from_config<C: PipelineConfig + ?Sized>(config: &C) -> Self {
        Self {
            current_year: config.current_year(),
            mileage_unit: config.mileage_unit(),
            filter_threshold: config.filter_threshold(),
        }
    }
}

/// 単一レコードの評価
///
/// 経年値が閾値未満なら `Accepted`、それ以外は `Rejected`。
pub fn evaluate_car(car: Car, rules: &RatingRules) -> RatingOutcome {
    let age = car.age(rules.current_year, rules.mileage_unit);
    if age < rules.filter_threshold {
        RatingOutcome::Accepted(RatedCar::new(car, age))
    } else {
        RatingOutcome::Rejected { car, age }
    }
}
