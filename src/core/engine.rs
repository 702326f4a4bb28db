//! LDL estimation and risk classification.
//!
//! LDL is estimated with the Friedewald formula:
//!
//! ```text
//! LDL = total - (triglycerides / 5 + HDL)
//! ```
//!
//! where `triglycerides / 5` stands in for VLDL cholesterol. All values are mg/dL.

use crate::domain::model::{
    Classification, Field, InputMode, LabReading, LdlResult, RawReading, RiskBand,
};
use crate::utils::error::{LdlError, Result};

/// Stateless engine; the only setting is how text input is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LdlEngine {
    mode: InputMode,
}

impl LdlEngine {
    pub fn new(mode: InputMode) -> Self {
        Self { mode }
    }

    pub fn lenient() -> Self {
        Self::new(InputMode::Lenient)
    }

    pub fn strict() -> Self {
        Self::new(InputMode::Strict)
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Parse `raw` as a decimal number, or `0.0` if that fails.
    ///
    /// Non-finite values (`NaN`, `inf`) also become `0.0`.
    pub fn normalize(raw: &str) -> f64 {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => 0.0,
        }
    }

    /// Strict counterpart of [`LdlEngine::normalize`].
    pub fn parse(field: Field, raw: &str) -> Result<f64> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| LdlError::InvalidNumber {
                field: field.label().to_string(),
                value: raw.to_string(),
            })?;

        if !value.is_finite() {
            return Err(LdlError::NonFiniteValue {
                field: field.label().to_string(),
                value: raw.to_string(),
            });
        }

        Ok(value)
    }

    /// Friedewald estimate. No rounding.
    pub fn compute_ldl(total_cholesterol: f64, hdl_cholesterol: f64, triglycerides: f64) -> f64 {
        total_cholesterol - (triglycerides / 5.0 + hdl_cholesterol)
    }

    pub fn classify(ldl: f64) -> Classification {
        RiskBand::ALL
            .into_iter()
            .find(|band| band.contains(ldl))
            .map_or(Classification::Unclassified, Classification::Band)
    }

    pub fn read(&self, raw: &RawReading) -> Result<LabReading> {
        let value = |field: Field| -> Result<f64> {
            match self.mode {
                InputMode::Lenient => Ok(Self::normalize(raw.get(field))),
                InputMode::Strict => Self::parse(field, raw.get(field)),
            }
        };

        Ok(LabReading {
            total_cholesterol: value(Field::Total)?,
            hdl_cholesterol: value(Field::Hdl)?,
            triglycerides: value(Field::Triglycerides)?,
        })
    }

    pub fn evaluate_reading(reading: &LabReading) -> LdlResult {
        let ldl = Self::compute_ldl(
            reading.total_cholesterol,
            reading.hdl_cholesterol,
            reading.triglycerides,
        );
        LdlResult {
            reading: *reading,
            ldl,
            classification: Self::classify(ldl),
        }
    }

    pub fn evaluate(&self, raw: &RawReading) -> Result<LdlResult> {
        let reading = self.read(raw)?;
        let result = Self::evaluate_reading(&reading);
        if !result.ldl.is_finite() {
            tracing::warn!("LDL overflowed to {} for {:?}", result.ldl, reading);
        }
        tracing::debug!(
            "Evaluated reading {:?}: ldl={} band={}",
            reading,
            result.ldl,
            result.classification.key()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(LdlEngine::normalize(""), 0.0);
        assert_eq!(LdlEngine::normalize("abc"), 0.0);
        assert_eq!(LdlEngine::normalize("120"), 120.0);
        assert_eq!(LdlEngine::normalize("120.5"), 120.5);
        assert_eq!(LdlEngine::normalize(" 42 "), 42.0);
        assert_eq!(LdlEngine::normalize("NaN"), 0.0);
        assert_eq!(LdlEngine::normalize("inf"), 0.0);
        assert_eq!(LdlEngine::normalize("-15"), -15.0);
    }

    #[test]
    fn test_parse_strict() {
        assert_eq!(LdlEngine::parse(Field::Total, " 120 ").unwrap(), 120.0);
        assert!(matches!(
            LdlEngine::parse(Field::Total, ""),
            Err(LdlError::InvalidNumber { .. })
        ));
        assert!(matches!(
            LdlEngine::parse(Field::Hdl, "abc"),
            Err(LdlError::InvalidNumber { .. })
        ));
        assert!(matches!(
            LdlEngine::parse(Field::Triglycerides, "NaN"),
            Err(LdlError::NonFiniteValue { .. })
        ));
        assert!(matches!(
            LdlEngine::parse(Field::Triglycerides, "inf"),
            Err(LdlError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn test_compute_ldl() {
        assert_eq!(LdlEngine::compute_ldl(200.0, 50.0, 150.0), 120.0);
        assert_eq!(LdlEngine::compute_ldl(0.0, 0.0, 0.0), 0.0);
        assert_eq!(LdlEngine::compute_ldl(100.0, 80.0, 200.0), -20.0);
    }

    #[test]
    fn test_classify_boundaries() {
        let cases = [
            (99.9, Classification::Band(RiskBand::Optimal)),
            (100.0, Classification::Band(RiskBand::NearOptimal)),
            (129.9, Classification::Band(RiskBand::NearOptimal)),
            (130.0, Classification::Band(RiskBand::BorderlineHigh)),
            (159.9, Classification::Band(RiskBand::BorderlineHigh)),
            (160.0, Classification::Band(RiskBand::High)),
            (189.9, Classification::Band(RiskBand::High)),
            (190.0, Classification::Band(RiskBand::VeryHigh)),
            (0.0, Classification::Unclassified),
            (-10.0, Classification::Unclassified),
        ];
        for (ldl, expected) in cases {
            assert_eq!(LdlEngine::classify(ldl), expected, "ldl = {}", ldl);
        }
    }

    #[test]
    fn test_classify_tiny_positive_and_nan() {
        assert_eq!(
            LdlEngine::classify(f64::MIN_POSITIVE),
            Classification::Band(RiskBand::Optimal)
        );
        assert_eq!(LdlEngine::classify(f64::NAN), Classification::Unclassified);
    }

    #[test]
    fn test_overflowed_ldl_is_unclassified() {
        let result = LdlEngine::lenient()
            .evaluate(&RawReading::new("1e308", "-1.7e308", "0"))
            .unwrap();
        assert_eq!(result.ldl, f64::INFINITY);
        assert_eq!(result.classification, Classification::Unclassified);
        assert_eq!(LdlEngine::classify(f64::NEG_INFINITY), Classification::Unclassified);
    }

    #[test]
    fn test_strict_read_reports_first_bad_field() {
        let err = LdlEngine::strict()
            .read(&RawReading::new("200", "x", ""))
            .unwrap_err();
        match err {
            LdlError::InvalidNumber { field, value } => {
                assert_eq!(field, "HDL cholesterol");
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
