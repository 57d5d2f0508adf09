//! # Configuration Tests
//!
//! Parsing of the command-line spellings, validation rules, JSON deserialization, and the
//! geometry helpers (capacity, page count, address to frame).

use rstest::rstest;
use vmsim_core::SimError;
use vmsim_core::config::{Algorithm, Config, SwapMode};

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.page_size, 2);
    assert_eq!(config.algorithm, Algorithm::Fifo);
    assert_eq!(config.swap_mode, SwapMode::Demand);
    assert_eq!(config.memory_size, 512);
    assert!(config.validate().is_ok());
}

#[rstest]
#[case("FIFO", Algorithm::Fifo)]
#[case("LRU", Algorithm::Lru)]
#[case("Clock", Algorithm::Clock)]
fn test_algorithm_from_str(#[case] name: &str, #[case] expected: Algorithm) {
    assert_eq!(name.parse::<Algorithm>().unwrap(), expected);
}

/// Command-line names are case-sensitive.
#[rstest]
#[case("fifo")]
#[case("lru")]
#[case("clock")]
#[case("CLOCK")]
#[case("Lru")]
#[case(" FIFO")]
fn test_algorithm_wrong_case_is_config_error(#[case] name: &str) {
    let err = name.parse::<Algorithm>().unwrap_err();
    assert!(matches!(err, SimError::Config(_)), "{name}");
}

#[test]
fn test_algorithm_unknown_is_config_error() {
    let err = "OPT".parse::<Algorithm>().unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
    assert_eq!(err.kind(), "ConfigError");
}

#[test]
fn test_algorithm_display_round_trips() {
    for algo in Algorithm::ALL {
        assert_eq!(algo.to_string().parse::<Algorithm>().unwrap(), algo);
    }
}

#[rstest]
#[case("+", SwapMode::PrePaging)]
#[case("-", SwapMode::Demand)]
fn test_swap_mode_from_flag(#[case] flag: &str, #[case] expected: SwapMode) {
    let mode: SwapMode = flag.parse().unwrap();
    assert_eq!(mode, expected);
    assert_eq!(mode.flag(), flag);
}

#[rstest]
#[case("")]
#[case("++")]
#[case("demand")]
#[case("1")]
fn test_swap_mode_malformed(#[case] flag: &str) {
    assert!(matches!(
        flag.parse::<SwapMode>(),
        Err(SimError::Config(_))
    ));
}

#[rstest]
#[case(2, true)]
#[case(4, true)]
#[case(8, true)]
#[case(16, true)]
#[case(32, true)]
#[case(0, false)]
#[case(1, false)]
#[case(3, false)]
#[case(12, false)]
#[case(64, false)]
fn test_page_size_validation(#[case] page_size: u64, #[case] valid: bool) {
    let config = Config::new(page_size, Algorithm::Lru, SwapMode::Demand);
    assert_eq!(config.validate().is_ok(), valid, "page size {page_size}");
}

#[test]
fn test_zero_memory_is_rejected() {
    let config = Config::default().with_memory_size(0);
    assert!(matches!(config.validate(), Err(SimError::Config(_))));
}

#[rstest]
#[case(1, 2, 256)]
#[case(2, 2, 128)]
#[case(3, 4, 42)]
#[case(10, 32, 1)]
#[case(20, 32, 0)]
#[case(0, 8, 0)]
fn test_capacity_for(#[case] processes: usize, #[case] page_size: u64, #[case] expected: usize) {
    let config = Config::new(page_size, Algorithm::Fifo, SwapMode::Demand);
    assert_eq!(config.capacity_for(processes), expected);
}

#[test]
fn test_pages_for_rounds_up() {
    let config = Config::new(4, Algorithm::Fifo, SwapMode::Demand);
    assert_eq!(config.pages_for(16), 4);
    assert_eq!(config.pages_for(17), 5);
    assert_eq!(config.pages_for(1), 1);
    assert_eq!(config.pages_for(0), 0);
}

/// Addresses are 1-based: bytes 1..=page_size live in frame 0.
#[test]
fn test_frame_for_address() {
    let config = Config::new(4, Algorithm::Fifo, SwapMode::Demand);
    assert_eq!(config.frame_for(0), None);
    assert_eq!(config.frame_for(1), Some(0));
    assert_eq!(config.frame_for(4), Some(0));
    assert_eq!(config.frame_for(5), Some(1));
    assert_eq!(config.frame_for(8), Some(1));
    assert_eq!(config.frame_for(9), Some(2));
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "page_size": 16,
        "algorithm": "LRU",
        "swap_mode": "PrePaging",
        "memory_size": 1024
    }"#;
    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.page_size, 16);
    assert_eq!(config.algorithm, Algorithm::Lru);
    assert_eq!(config.swap_mode, SwapMode::PrePaging);
    assert_eq!(config.memory_size, 1024);
}

#[test]
fn test_config_from_json_defaults_and_aliases() {
    let config: Config = serde_json::from_str(r#"{ "algorithm": "clock", "swap_mode": "-" }"#)
        .unwrap();
    assert_eq!(config.page_size, 2);
    assert_eq!(config.algorithm, Algorithm::Clock);
    assert_eq!(config.swap_mode, SwapMode::Demand);
    assert_eq!(config.memory_size, 512);
}

#[test]
fn test_config_serializes_canonical_names() {
    let config = Config::new(8, Algorithm::Lru, SwapMode::PrePaging);
    let value = serde_json::to_value(config).unwrap();
    assert_eq!(value["algorithm"], "LRU");
    assert_eq!(value["swap_mode"], "PrePaging");
}
