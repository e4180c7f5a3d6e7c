//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.probability.decimal_places, 6);
    assert_eq!(config.brute_force.max_solutions, 400);
}

#[test]
fn test_probability_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.probability.decimal_places, 6);
    assert!((config.probability.tolerance - 0.96).abs() < f64::EPSILON);
}

#[test]
fn test_brute_force_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.brute_force.max_solutions, 400);
    assert_eq!(config.brute_force.max_nodes, 50_000);
    assert!(config.brute_force.tie_break);
    assert!(config.brute_force.prune);
    assert!(config.brute_force.use_cache);
    assert_eq!(config.brute_force.cache_threshold, 10);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config: CentralConfig = toml::from_str(
        r#"
        [brute_force]
        max_solutions = 800
        "#,
    )
    .unwrap();
    assert_eq!(config.brute_force.max_solutions, 800);
    // untouched keys fall back to built-in defaults
    assert_eq!(config.brute_force.max_nodes, 50_000);
    assert!((config.probability.tolerance - 0.96).abs() < f64::EPSILON);
}

#[test]
fn test_solver_env_overrides() {
    std::env::set_var("SOLVER_COMMON_LOG_LEVEL", "debug");
    std::env::set_var("SOLVER_BRUTE_FORCE_MAX_NODES", "12345");
    std::env::set_var("SOLVER_PROBABILITY_TOLERANCE", "0.5");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.brute_force.max_nodes, 12_345);
    assert!((config.probability.tolerance - 0.5).abs() < f64::EPSILON);

    std::env::remove_var("SOLVER_COMMON_LOG_LEVEL");
    std::env::remove_var("SOLVER_BRUTE_FORCE_MAX_NODES");
    std::env::remove_var("SOLVER_PROBABILITY_TOLERANCE");
}

#[test]
fn test_invalid_env_override_ignored() {
    std::env::set_var("SOLVER_BRUTE_FORCE_CACHE_THRESHOLD", "not-a-number");
    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.brute_force.cache_threshold, 10);
    std::env::remove_var("SOLVER_BRUTE_FORCE_CACHE_THRESHOLD");
}
