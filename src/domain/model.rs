use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::LdlError;

/// Unparsed lab values exactly as typed (or as read from a CSV row).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReading {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub total_cholesterol: String,
    #[serde(default)]
    pub hdl_cholesterol: String,
    #[serde(default)]
    pub triglycerides: String,
}

impl RawReading {
    pub fn new(
        total_cholesterol: impl Into<String>,
        hdl_cholesterol: impl Into<String>,
        triglycerides: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            total_cholesterol: total_cholesterol.into(),
            hdl_cholesterol: hdl_cholesterol.into(),
            triglycerides: triglycerides.into(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Total => &self.total_cholesterol,
            Field::Hdl => &self.hdl_cholesterol,
            Field::Triglycerides => &self.triglycerides,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Total => &mut self.total_cholesterol,
            Field::Hdl => &mut self.hdl_cholesterol,
            Field::Triglycerides => &mut self.triglycerides,
        };
        *slot = value.into();
    }
}

/// Parsed lab values in mg/dL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LabReading {
    pub total_cholesterol: f64,
    pub hdl_cholesterol: f64,
    pub triglycerides: f64,
}

impl LabReading {
    pub fn new(total_cholesterol: f64, hdl_cholesterol: f64, triglycerides: f64) -> Self {
        Self {
            total_cholesterol,
            hdl_cholesterol,
            triglycerides,
        }
    }
}

/// One of the three form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Total,
    Hdl,
    Triglycerides,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Total => "Total cholesterol",
            Field::Hdl => "HDL cholesterol",
            Field::Triglycerides => "Triglycerides",
        }
    }

    /// Short name used on the command line and in the form session.
    pub fn key(self) -> &'static str {
        match self {
            Field::Total => "total",
            Field::Hdl => "hdl",
            Field::Triglycerides => "trig",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Field {
    type Err = LdlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "total" | "total_cholesterol" => Ok(Field::Total),
            "hdl" | "hdl_cholesterol" => Ok(Field::Hdl),
            "trig" | "triglycerides" => Ok(Field::Triglycerides),
            other => Err(LdlError::UnknownField {
                name: other.to_string(),
            }),
        }
    }
}

/// How text input is turned into numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Unparseable text counts as 0.0.
    #[default]
    Lenient,
    /// Unparseable text is an error.
    Strict,
}

/// LDL risk band. Lower bounds are inclusive, upper bounds exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    Optimal,
    NearOptimal,
    BorderlineHigh,
    High,
    VeryHigh,
}

impl RiskBand {
    /// Ascending order; `classify` walks this list.
    pub const ALL: [RiskBand; 5] = [
        RiskBand::Optimal,
        RiskBand::NearOptimal,
        RiskBand::BorderlineHigh,
        RiskBand::High,
        RiskBand::VeryHigh,
    ];

    /// Lower bound in mg/dL. Optimal's bound of 0 is exclusive.
    pub fn lower_bound(self) -> f64 {
        match self {
            RiskBand::Optimal => 0.0,
            RiskBand::NearOptimal => 100.0,
            RiskBand::BorderlineHigh => 130.0,
            RiskBand::High => 160.0,
            RiskBand::VeryHigh => 190.0,
        }
    }

    pub fn upper_bound(self) -> Option<f64> {
        match self {
            RiskBand::Optimal => Some(100.0),
            RiskBand::NearOptimal => Some(130.0),
            RiskBand::BorderlineHigh => Some(160.0),
            RiskBand::High => Some(190.0),
            RiskBand::VeryHigh => None,
        }
    }

    /// Non-finite values (NaN, an overflowed `inf`) belong to no band.
    pub fn contains(self, ldl: f64) -> bool {
        if !ldl.is_finite() {
            return false;
        }
        let above_lower = match self {
            RiskBand::Optimal => ldl > self.lower_bound(),
            _ => ldl >= self.lower_bound(),
        };
        let below_upper = self.upper_bound().map_or(true, |upper| ldl < upper);
        above_lower && below_upper
    }

    pub fn key(self) -> &'static str {
        match self {
            RiskBand::Optimal => "optimal",
            RiskBand::NearOptimal => "near_optimal",
            RiskBand::BorderlineHigh => "borderline_high",
            RiskBand::High => "high",
            RiskBand::VeryHigh => "very_high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskBand::Optimal => "Optimal",
            RiskBand::NearOptimal => "Near-optimal",
            RiskBand::BorderlineHigh => "Borderline high",
            RiskBand::High => "High",
            RiskBand::VeryHigh => "Very high",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of classifying an LDL value. `Unclassified` covers `ldl <= 0`
/// and non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Band(RiskBand),
    Unclassified,
}

impl Classification {
    pub fn band(self) -> Option<RiskBand> {
        match self {
            Classification::Band(band) => Some(band),
            Classification::Unclassified => None,
        }
    }

    pub fn is_classified(self) -> bool {
        matches!(self, Classification::Band(_))
    }

    pub fn key(self) -> &'static str {
        match self {
            Classification::Band(band) => band.key(),
            Classification::Unclassified => "unclassified",
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LdlResult {
    pub reading: LabReading,
    pub ldl: f64,
    pub classification: Classification,
}
