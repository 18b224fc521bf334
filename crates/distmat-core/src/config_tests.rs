//! Tests for config module

use super::*;
use figment::Jail;

// ========================================================================
// Defaults
// ========================================================================

#[test]
fn test_config_default_values() {
    // Arrange & Act
    let config = ConverterConfig::default();

    // Assert
    assert_eq!(config.input.path, Path::new(DEFAULT_INPUT_PATH));
    assert_eq!(config.output.path, Path::new(DEFAULT_OUTPUT_PATH));
    assert!(!config.input.strict_fields);
    assert_eq!(config.output.format, OutputFormat::Bincode);
    assert!(config.output.atomic);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_default_paths_match_fixed_constants() {
    assert_eq!(DEFAULT_INPUT_PATH, "20NG/elki_distance_matrix.txt");
    assert_eq!(DEFAULT_OUTPUT_PATH, "20ng_entity_graph_with_tfidf_NVS.p");
}

#[test]
fn test_derived_options() {
    let mut config = ConverterConfig::default();
    config.input.strict_fields = true;
    config.output.format = OutputFormat::Json;
    config.output.atomic = false;

    assert!(config.parse_options().strict_fields);
    assert_eq!(
        config.output_options(),
        OutputOptions {
            format: OutputFormat::Json,
            atomic: false,
        }
    );
}

// ========================================================================
// TOML parsing
// ========================================================================

#[test]
fn test_from_toml_partial_override() {
    // Arrange
    let toml_str = r#"
        [output]
        path = "out/matrix.json"
        format = "json"
    "#;

    // Act
    let config = ConverterConfig::from_toml(toml_str).unwrap();

    // Assert
    assert_eq!(config.output.path, Path::new("out/matrix.json"));
    assert_eq!(config.output.format, OutputFormat::Json);
    assert!(config.output.atomic);
    assert_eq!(config.input.path, Path::new(DEFAULT_INPUT_PATH));
}

#[test]
fn test_from_toml_rejects_unknown_format() {
    let result = ConverterConfig::from_toml("[output]\nformat = \"pickle\"\n");
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_to_toml_round_trips() {
    let mut config = ConverterConfig::default();
    config.input.strict_fields = true;
    config.logging.level = "debug".to_string();

    let rendered = config.to_toml().unwrap();
    let parsed = ConverterConfig::from_toml(&rendered).unwrap();

    assert_eq!(parsed, config);
    assert!(rendered.contains("[input]"));
}

// ========================================================================
// Validation
// ========================================================================

#[test]
fn test_validate_rejects_empty_paths() {
    let mut config = ConverterConfig::default();
    config.input.path = PathBuf::new();

    let err = config.validate().unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "input.path"));
}

#[test]
fn test_validate_rejects_output_over_input() {
    let mut config = ConverterConfig::default();
    config.output.path = config.input.path.clone();

    let err = config.validate().unwrap_err();

    assert!(err.to_string().contains("overwrite the input"));
}

#[test]
fn test_validate_rejects_unknown_log_level() {
    let mut config = ConverterConfig::default();
    config.logging.level = "loud".to_string();

    let err = config.validate().unwrap_err();

    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "logging.level"));
}

// ========================================================================
// File and environment layering
// ========================================================================

#[test]
fn test_load_without_file_uses_defaults() {
    Jail::expect_with(|_jail| {
        let config = ConverterConfig::load().expect("load");
        assert_eq!(config, ConverterConfig::default());
        Ok(())
    });
}

#[test]
fn test_load_reads_config_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            DEFAULT_CONFIG_FILE,
            r#"
                [input]
                path = "data/matrix.txt"
                strict_fields = true
            "#,
        )?;

        let config = ConverterConfig::load().expect("load");

        assert_eq!(config.input.path, Path::new("data/matrix.txt"));
        assert!(config.input.strict_fields);
        Ok(())
    });
}

#[test]
fn test_env_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[output]\nformat = \"bincode\"\n")?;
        jail.set_env("DISTMAT_OUTPUT__FORMAT", "json");
        jail.set_env("DISTMAT_INPUT__STRICT_FIELDS", "true");

        let config = ConverterConfig::load_from_path("custom.toml").expect("load");

        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.input.strict_fields);
        Ok(())
    });
}
