use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::model::{Classification, LdlResult, RiskBand};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum BatchOutputFormat {
    #[default]
    Csv,
    Json,
}

impl BatchOutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            BatchOutputFormat::Csv => "csv",
            BatchOutputFormat::Json => "json",
        }
    }
}

/// What to do with a row that fails strict parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowErrorPolicy {
    #[default]
    Skip,
    Fail,
}

/// One evaluated row of batch output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub id: Option<String>,
    pub total_cholesterol: f64,
    pub hdl_cholesterol: f64,
    pub triglycerides: f64,
    pub ldl: f64,
    pub band: Classification,
}

impl ResultRow {
    pub fn from_result(id: Option<String>, result: &LdlResult) -> Self {
        Self {
            id,
            total_cholesterol: result.reading.total_cholesterol,
            hdl_cholesterol: result.reading.hdl_cholesterol,
            triglycerides: result.reading.triglycerides,
            ldl: result.ldl,
            band: result.classification,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub classified: usize,
    pub unclassified: usize,
    pub skipped: usize,
    pub bands: BTreeMap<RiskBand, usize>,
}

impl BatchSummary {
    pub fn record(&mut self, classification: Classification) {
        self.rows += 1;
        match classification.band() {
            Some(band) => {
                self.classified += 1;
                *self.bands.entry(band).or_insert(0) += 1;
            }
            None => self.unclassified += 1,
        }
    }

    pub fn band_count(&self, band: RiskBand) -> usize {
        self.bands.get(&band).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub rows: Vec<ResultRow>,
    pub summary: BatchSummary,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub output_path: String,
    pub summary: BatchSummary,
}
