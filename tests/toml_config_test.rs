use ldl_calc::domain::report::BatchOutputFormat;
use ldl_calc::utils::validation::Validate;
use ldl_calc::{BatchEngine, CsvPipeline, InputMode, LdlError, LocalStorage, TomlConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_file_drives_batch_run() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("readings.csv");
    let output = temp_dir.path().join("results.json");
    fs::write(
        &input,
        "total_cholesterol,hdl_cholesterol,triglycerides\n200,50,150\n",
    )
    .unwrap();

    let config_path = temp_dir.path().join("ldl-config.toml");
    fs::write(
        &config_path,
        format!(
            "[engine]\nmode = \"strict\"\n\n[batch]\ninput_path = {:?}\noutput_path = {:?}\noutput_format = \"json\"\n",
            input.to_str().unwrap(),
            output.to_str().unwrap()
        ),
    )
    .unwrap();

    let config = TomlConfig::from_file(&config_path).unwrap();
    config.validate().unwrap();
    let settings = config.batch_settings().unwrap();
    assert_eq!(settings.mode, InputMode::Strict);
    assert_eq!(settings.output_format, BatchOutputFormat::Json);

    // Absolute paths in the config bypass the storage root.
    let report = BatchEngine::new(CsvPipeline::new(LocalStorage::new("."), settings))
        .run()
        .unwrap();
    assert_eq!(report.summary.rows, 1);
    assert!(output.exists());
}

#[test]
fn test_missing_config_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = TomlConfig::from_file(temp_dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, LdlError::IoError(_)));
}

#[test]
fn test_malformed_toml_is_config_error() {
    let err = TomlConfig::from_toml_str("[output\nprecision = 3").unwrap_err();
    assert!(matches!(err, LdlError::ConfigError { .. }));
    assert_eq!(err.exit_code(), 2);
}
