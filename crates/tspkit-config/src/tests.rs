use super::*;

#[test]
fn default_config_is_valid() {
    let config = SolverConfig::default();
    assert_eq!(config.k, 2);
    assert_eq!(config.passes, 1);
    assert_eq!(config.initializer, Initializer::NearestNeighbor { start: Some(0) });
}

#[test]
fn parses_nearest_neighbor_from_toml() {
    let config = SolverConfig::from_toml_str(
        r#"
        k = 4
        passes = 2
        min_cost_improvement = 0.5

        [initializer]
        type = "nearest_neighbor"
        "#,
    )
    .unwrap();
    assert_eq!(config.k, 4);
    assert_eq!(config.passes, 2);
    assert_eq!(config.min_cost_improvement, 0.5);
    assert_eq!(config.initializer, Initializer::NearestNeighbor { start: None });
}

#[test]
fn parses_random_initializer_from_yaml() {
    let config = SolverConfig::from_yaml_str(
        "k: 3\npasses: 5\nmin_cost_improvement: 0.0\ninitializer:\n  type: random\n  seed: 7\n",
    )
    .unwrap();
    assert_eq!(config.initializer, Initializer::Random { seed: Some(7) });
}

#[test]
fn rejects_k_below_two() {
    let result = SolverConfig::from_toml_str("k = 1\n");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn rejects_zero_passes() {
    let result = SolverConfig::from_toml_str("passes = 0\n");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn rejects_negative_min_cost_improvement() {
    let result = SolverConfig::from_toml_str("min_cost_improvement = -1.0\n");
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
fn rejects_malformed_toml() {
    let result = SolverConfig::from_toml_str("k = [this is not valid");
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn load_dispatches_on_extension() {
    let dir = std::env::temp_dir().join(format!(
        "tspkit-config-test-{:?}",
        std::thread::current().id()
    ));
    std::fs::create_dir_all(&dir).unwrap();

    let toml_path = dir.join("config.toml");
    std::fs::write(&toml_path, "k = 3\n").unwrap();
    assert_eq!(SolverConfig::load(&toml_path).unwrap().k, 3);

    let yaml_path = dir.join("config.yaml");
    std::fs::write(&yaml_path, "k: 5\n").unwrap();
    assert_eq!(SolverConfig::load(&yaml_path).unwrap().k, 5);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn config_error_converts_to_tsp_error() {
    let err = SolverConfig::from_toml_str("k = 0\n").unwrap_err();
    let tsp_err: TspError = err.into();
    assert!(matches!(tsp_err, TspError::InvalidParameter(_)));
}
