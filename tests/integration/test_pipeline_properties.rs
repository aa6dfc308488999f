// パイプラインの性質テスト（件数保存・整列・デッドロックなし・決定性）
use crate::fixtures::*;
use fleet_pipeline::{
    run, Car, DefaultPipelineConfig, NoOpProgressReporter, PipelineCoordinator, ShutdownPolicy,
};
use std::sync::Arc;
use tokio::time::{timeout, Duration};

fn records(count: usize) -> Vec<Car> {
    (0..count)
        .map(|i| Car::new(format!("car{i}"), 1990 + (i % 35) as i32, (i * 9_500) as f64))
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_no_deadlock_across_configurations() {
    for count in [0usize, 1, 7, 64] {
        for workers in [1usize, 2, 5, 16] {
            for capacity in [1usize, 3, 100] {
                let input = records(count);
                let expected = expected_results(&input, TEST_THRESHOLD, TEST_YEAR);

                let results = timeout(
                    Duration::from_secs(10),
                    run(input, workers, capacity, TEST_THRESHOLD, TEST_YEAR),
                )
                .await
                .unwrap_or_else(|_| {
                    panic!("deadlock: records={count} workers={workers} capacity={capacity}")
                })
                .unwrap();

                let ages: Vec<i32> = results.iter().map(|r| r.age).collect();
                let expected_ages: Vec<i32> = expected.iter().map(|r| r.age).collect();
                assert_eq!(ages, expected_ages);
                assert_eq!(results.len(), expected.len());
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_relay_shutdown_with_more_workers_than_records() {
    let coordinator = PipelineCoordinator::new(Arc::new(NoOpProgressReporter::new()));
    let config = DefaultPipelineConfig::new(12)
        .with_buffer_capacity(1)
        .with_current_year(TEST_YEAR)
        .with_shutdown_policy(ShutdownPolicy::Relay)
        .with_progress_reporting(false);

    let outcome = timeout(Duration::from_secs(10), coordinator.execute(records(3), &config))
        .await
        .expect("relay shutdown deadlocked")
        .unwrap();

    assert_eq!(outcome.worker_reports.len(), 12);
    assert_eq!(outcome.summary.accepted + outcome.summary.rejected, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_results_are_sorted_and_unique() {
    let fleet = sample_fleet();
    let results = run(fleet.clone(), 8, 2, TEST_THRESHOLD, TEST_YEAR)
        .await
        .unwrap();

    // 隣接ペアで後ろが前より先に並ぶことはない
    for pair in results.windows(2) {
        assert!(!pair[1].ranks_before(&pair[0]));
    }

    // 各結果は入力に1回だけ対応する
    for rated in &results {
        let occurrences = results.iter().filter(|r| r.car.make == rated.car.make).count();
        assert_eq!(occurrences, 1);
        assert!(fleet.contains(&rated.car));
        assert!(rated.age < TEST_THRESHOLD);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_results_independent_of_concurrency_settings() {
    let fleet = sample_fleet();
    let baseline = run(fleet.clone(), 1, 1, TEST_THRESHOLD, TEST_YEAR)
        .await
        .unwrap();

    for (workers, capacity) in [(2, 1), (4, 4), (9, 2), (30, 30)] {
        let results = run(fleet.clone(), workers, capacity, TEST_THRESHOLD, TEST_YEAR)
            .await
            .unwrap();
        assert_eq!(results, baseline, "workers={workers} capacity={capacity}");
    }
    assert_eq!(baseline, expected_results(&fleet, TEST_THRESHOLD, TEST_YEAR));
}

#[tokio::test]
async fn test_threshold_boundaries() {
    // age == 閾値は除外、閾値 - 1 は通過
    let input = vec![
        Car::new("AtThreshold", TEST_YEAR - TEST_THRESHOLD, 0.0),
        Car::new("JustBelow", TEST_YEAR - TEST_THRESHOLD + 1, 0.0),
        Car::new("MileageTipsOver", TEST_YEAR - TEST_THRESHOLD + 1, 20_000.0),
    ];

    let results = run(input, 3, 1, TEST_THRESHOLD, TEST_YEAR).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].car.make, "JustBelow");
    assert_eq!(results[0].age, TEST_THRESHOLD - 1);
}
