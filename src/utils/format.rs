//! Human-facing rendering of evaluation results.
//!
//! The engine hands back unrounded values and band keys; everything here is
//! presentation only.

use serde::{Deserialize, Serialize};

use crate::domain::model::{Classification, LabReading, LdlResult, RiskBand};
use crate::utils::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Maximum number of fraction digits.
    pub precision: usize,
    pub grouping: bool,
    pub unclassified_label: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            precision: 3,
            grouping: true,
            unclassified_label: "-".to_string(),
        }
    }
}

pub fn format_ldl(value: f64, options: &DisplayOptions) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", options.precision, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    if options.grouping {
        out.push_str(&group_thousands(int_part));
    } else {
        out.push_str(int_part);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn classification_label(classification: Classification, options: &DisplayOptions) -> &str {
    match classification {
        Classification::Band(band) => band.label(),
        Classification::Unclassified => &options.unclassified_label,
    }
}

pub fn render_text(result: &LdlResult, options: &DisplayOptions) -> String {
    let evaluation = format!(
        "LDL evaluation: {}",
        classification_label(result.classification, options)
    );
    format!(
        "LDL cholesterol: {}\n{}",
        format_ldl(result.ldl, options),
        evaluation.trim_end()
    )
}

#[derive(Debug, Serialize)]
struct EvaluationView<'a> {
    reading: &'a LabReading,
    ldl: f64,
    ldl_display: String,
    band: Classification,
    label: Option<&'static str>,
}

pub fn render_json(result: &LdlResult, options: &DisplayOptions) -> Result<String> {
    let view = EvaluationView {
        reading: &result.reading,
        ldl: result.ldl,
        ldl_display: format_ldl(result.ldl, options),
        band: result.classification,
        label: result.classification.band().map(RiskBand::label),
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

pub fn render(result: &LdlResult, format: OutputFormat, options: &DisplayOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result, options)),
        OutputFormat::Json => render_json(result, options),
    }
}

pub fn render_band_table() -> String {
    let mut out = format!("{:<16} {:<16} {}\n", "band", "key", "LDL (mg/dL)");
    for band in RiskBand::ALL {
        let lower = if band == RiskBand::Optimal { "(" } else { "[" };
        let range = match band.upper_bound() {
            Some(upper) => format!("{}{}, {})", lower, band.lower_bound(), upper),
            None => format!("{}{}, +inf)", lower, band.lower_bound()),
        };
        out.push_str(&format!("{:<16} {:<16} {}\n", band.label(), band.key(), range));
    }
    out
}
