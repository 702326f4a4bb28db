use crate::core::engine::LdlEngine;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::RawReading;
use crate::domain::report::{
    BatchOutputFormat, BatchSummary, ResultRow, RowErrorPolicy, TransformResult,
};
use crate::utils::error::{LdlError, Result};
use serde::Serialize;

pub const EXPECTED_COLUMNS: [&str; 3] =
    ["total_cholesterol", "hdl_cholesterol", "triglycerides"];

/// True when at least one of [`EXPECTED_COLUMNS`] is present.
pub fn has_expected_columns(headers: &csv::StringRecord) -> bool {
    EXPECTED_COLUMNS
        .iter()
        .any(|column| headers.iter().any(|header| header == *column))
}

/// Reads raw readings from a CSV file and writes evaluated rows as CSV or JSON.
pub struct CsvPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    engine: LdlEngine,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    rows: &'a [ResultRow],
    summary: &'a BatchSummary,
}

impl<S: Storage, C: ConfigProvider> CsvPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let engine = LdlEngine::new(config.input_mode());
        tracing::debug!("Batch input mode: {:?}", engine.mode());
        Self {
            storage,
            config,
            engine,
        }
    }

    fn to_csv(rows: &[ResultRow]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        writer.into_inner().map_err(|e| LdlError::ProcessingError {
            message: format!("Failed to finish CSV output: {}", e),
        })
    }

    fn to_json(result: &TransformResult) -> Result<Vec<u8>> {
        let report = JsonReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            rows: &result.rows,
            summary: &result.summary,
        };
        Ok(serde_json::to_vec_pretty(&report)?)
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for CsvPipeline<S, C> {
    fn extract(&self) -> Result<Vec<RawReading>> {
        tracing::debug!("Reading CSV from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path())?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(data.as_slice());

        if !has_expected_columns(reader.headers()?) {
            tracing::warn!(
                "{} has none of the columns {}; every value will read as empty",
                self.config.input_path(),
                EXPECTED_COLUMNS.join(", ")
            );
        }

        let mut readings = Vec::new();
        for record in reader.deserialize() {
            let raw: RawReading = record?;
            readings.push(raw);
        }

        if readings.is_empty() {
            tracing::warn!("No readings found in {}", self.config.input_path());
        }

        Ok(readings)
    }

    fn transform(&self, data: Vec<RawReading>) -> Result<TransformResult> {
        let mut rows = Vec::with_capacity(data.len());
        let mut summary = BatchSummary::default();

        // Line 1 is the header.
        for (index, raw) in data.into_iter().enumerate() {
            let line = index + 2;
            match self.engine.evaluate(&raw) {
                Ok(result) => {
                    summary.record(result.classification);
                    rows.push(ResultRow::from_result(raw.id, &result));
                }
                Err(e) => match self.config.on_invalid_row() {
                    RowErrorPolicy::Skip => {
                        tracing::warn!("Skipping line {}: {}", line, e);
                        summary.skipped += 1;
                    }
                    RowErrorPolicy::Fail => {
                        return Err(LdlError::ProcessingError {
                            message: format!("Line {}: {}", line, e),
                        });
                    }
                },
            }
        }

        Ok(TransformResult { rows, summary })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let bytes = match self.config.output_format() {
            BatchOutputFormat::Csv => Self::to_csv(&result.rows)?,
            BatchOutputFormat::Json => Self::to_json(&result)?,
        };

        let output_path = self.config.output_path();
        self.storage.write_file(output_path, &bytes)?;
        tracing::debug!("Wrote {} bytes to {}", bytes.len(), output_path);

        Ok(output_path.to_string())
    }
}
