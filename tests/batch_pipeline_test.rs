use ldl_calc::domain::report::{BatchOutputFormat, RowErrorPolicy};
use ldl_calc::{
    BatchEngine, BatchSettings, CsvPipeline, InputMode, LdlError, LocalStorage, RiskBand,
};
use std::fs;
use tempfile::TempDir;

const READINGS: &str = "\
id,total_cholesterol,hdl_cholesterol,triglycerides
a,200,50,150
b,250,40,100
c,,,
d,180,abc,100
";

fn settings(mode: InputMode, format: BatchOutputFormat, policy: RowErrorPolicy) -> BatchSettings {
    BatchSettings {
        mode,
        input_path: "readings.csv".to_string(),
        output_path: format!("out/results.{}", format.extension()),
        output_format: format,
        on_invalid_row: policy,
    }
}

fn setup() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("readings.csv"), READINGS).unwrap();
    temp_dir
}

#[test]
fn test_lenient_batch_writes_csv() {
    let temp_dir = setup();
    let storage = LocalStorage::new(temp_dir.path());
    let pipeline = CsvPipeline::new(
        storage,
        settings(InputMode::Lenient, BatchOutputFormat::Csv, RowErrorPolicy::Skip),
    );

    let report = BatchEngine::new(pipeline).run().unwrap();
    assert_eq!(report.output_path, "out/results.csv");
    assert_eq!(report.summary.rows, 4);
    assert_eq!(report.summary.skipped, 0);
    // Row c is all zeros; row d has hdl coerced to 0 -> 180 - 20 = 160.
    assert_eq!(report.summary.unclassified, 1);
    assert_eq!(report.summary.band_count(RiskBand::NearOptimal), 1);
    assert_eq!(report.summary.band_count(RiskBand::VeryHigh), 1);
    assert_eq!(report.summary.band_count(RiskBand::High), 1);

    let output = fs::read_to_string(temp_dir.path().join("out/results.csv")).unwrap();
    let mut reader = csv::Reader::from_reader(output.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "total_cholesterol", "hdl_cholesterol", "triglycerides", "ldl", "band"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(&rows[0][0], "a");
    assert_eq!(rows[0][4].parse::<f64>().unwrap(), 120.0);
    assert_eq!(&rows[0][5], "near_optimal");
    assert_eq!(&rows[2][5], "unclassified");
}

#[test]
fn test_strict_batch_skips_invalid_rows() {
    let temp_dir = setup();
    let pipeline = CsvPipeline::new(
        LocalStorage::new(temp_dir.path()),
        settings(InputMode::Strict, BatchOutputFormat::Csv, RowErrorPolicy::Skip),
    );

    let report = BatchEngine::new(pipeline).run().unwrap();
    assert_eq!(report.summary.rows, 2);
    assert_eq!(report.summary.skipped, 2);
    assert_eq!(report.summary.classified, 2);
}

#[test]
fn test_strict_batch_fail_policy_aborts() {
    let temp_dir = setup();
    let pipeline = CsvPipeline::new(
        LocalStorage::new(temp_dir.path()),
        settings(InputMode::Strict, BatchOutputFormat::Csv, RowErrorPolicy::Fail),
    );

    let err = BatchEngine::new(pipeline).run().unwrap_err();
    match err {
        LdlError::ProcessingError { message } => assert!(message.starts_with("Line 4:")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!temp_dir.path().join("out/results.csv").exists());
}

#[test]
fn test_json_output_has_rows_and_summary() {
    let temp_dir = setup();
    let pipeline = CsvPipeline::new(
        LocalStorage::new(temp_dir.path()),
        settings(InputMode::Lenient, BatchOutputFormat::Json, RowErrorPolicy::Skip),
    );

    BatchEngine::new(pipeline).run().unwrap();

    let output = fs::read_to_string(temp_dir.path().join("out/results.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(json["generated_at"].is_string());
    assert_eq!(json["rows"].as_array().unwrap().len(), 4);
    assert_eq!(json["rows"][1]["ldl"], 190.0);
    assert_eq!(json["rows"][1]["band"], "very_high");
    assert_eq!(json["summary"]["rows"], 4);
    assert_eq!(json["summary"]["bands"]["near_optimal"], 1);
}

#[test]
fn test_missing_columns_read_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("readings.csv"),
        "total_cholesterol,hdl_cholesterol\n200,50\n",
    )
    .unwrap();

    let pipeline = CsvPipeline::new(
        LocalStorage::new(temp_dir.path()),
        settings(InputMode::Lenient, BatchOutputFormat::Csv, RowErrorPolicy::Skip),
    );
    let report = BatchEngine::new(pipeline).run().unwrap();
    assert_eq!(report.summary.rows, 1);
    assert_eq!(report.summary.band_count(RiskBand::NearOptimal), 0);
    assert_eq!(report.summary.band_count(RiskBand::BorderlineHigh), 1);
}

#[test]
fn test_missing_input_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let pipeline = CsvPipeline::new(
        LocalStorage::new(temp_dir.path()),
        settings(InputMode::Lenient, BatchOutputFormat::Csv, RowErrorPolicy::Skip),
    );
    let err = BatchEngine::new(pipeline).run().unwrap_err();
    assert!(matches!(err, LdlError::IoError(_)));
    assert_eq!(err.exit_code(), 3);
}
