// テスト用入力データ

use fleet_pipeline::{Car, RatedCar};
use std::path::{Path, PathBuf};

/// 基準年（テストの決定性のため固定）
pub const TEST_YEAR: i32 = 2026;
pub const TEST_THRESHOLD: i32 = 26;

/// 閾値の前後にまたがる30台の車両データ
pub fn sample_fleet() -> Vec<Car> {
    let makes = [
        "Volvo", "Audi", "BMW", "Toyota", "Honda", "Mazda", "Skoda", "Opel", "Fiat", "Kia",
    ];
    (0..30)
        .map(|i| {
            let make = makes[i % makes.len()];
            let year = 1985 + ((i * 7) % 40) as i32;
            let mileage = ((i * 37_000) % 400_000) as f64 + 0.25;
            Car::new(format!("{make}{i}"), year, mileage)
        })
        .collect()
}

/// 逐次処理による期待結果（安定ソート）
pub fn expected_results(cars: &[Car], threshold: i32, current_year: i32) -> Vec<RatedCar> {
    let mut rated: Vec<RatedCar> = cars
        .iter()
        .map(|car| RatedCar::new(car.clone(), car.age(current_year, 20_000.0)))
        .filter(|rated| rated.age < threshold)
        .collect();
    rated.sort_by(|a, b| a.age.cmp(&b.age).then(b.car.year.cmp(&a.car.year)));
    rated
}

/// 車両データをJSONファイルとして書き出す
pub fn write_input(dir: &Path, name: &str, cars: &[Car]) -> PathBuf {
    let path = dir.join(name);
    let content = serde_json::to_string_pretty(cars).expect("serialize cars");
    std::fs::write(&path, content).expect("write input file");
    path
}
