//! JSON round-trips for the configuration and result types.

#![cfg(feature = "serde")]

use concentration::{
    CancellationToken, DistanceKind, HistogramSpec, SampleSizeStrategy, SimulationConfig,
    SimulationResult, Tier, TieredSampleSize,
};

fn small_config() -> SimulationConfig {
    SimulationConfig::default()
        .with_dimensions(vec![3, 16])
        .with_sample_size(TieredSampleSize::new(
            vec![Tier {
                max_dimension: 8,
                count: 40,
            }],
            60,
        ))
        .with_batch_size(7)
        .with_view(DistanceKind::Normalized, HistogramSpec::new(-3.0, 5.0, 16))
}

#[test]
fn test_config_roundtrip() {
    let config = small_config();
    let json = serde_json::to_string(&config).unwrap();
    let back: SimulationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_empty_config_is_default() {
    let config: SimulationConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, SimulationConfig::default());
}

#[test]
fn test_tiers_sorted_when_deserialized() {
    let json = r#"{
        "tiers": [
            {"max_dimension": 256, "count": 20000},
            {"max_dimension": 32, "count": 10000}
        ],
        "fallback": 50000
    }"#;
    let policy: TieredSampleSize = serde_json::from_str(json).unwrap();
    assert_eq!(policy, TieredSampleSize::default());
    assert_eq!(policy.sample_count(8), 10_000);
    assert_eq!(policy.sample_count(100), 20_000);
    assert_eq!(policy.sample_count(1000), 50_000);
}

#[test]
fn test_result_roundtrip() {
    let result = small_config()
        .run_seeded(5, |_| {}, &CancellationToken::new())
        .unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: SimulationResult = serde_json::from_str(&json).unwrap();

    assert_eq!(back, result);
    assert_eq!(back.dimensions(), &[3, 16]);
    assert_eq!(back.samples(3).unwrap().len(), 40);
    assert_eq!(back.total_samples(), 100);
}
