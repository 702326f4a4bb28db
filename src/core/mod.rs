pub mod batch;
pub mod engine;

pub use crate::domain::model::{Classification, LabReading, LdlResult, RawReading, RiskBand};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::domain::report::{BatchReport, TransformResult};
pub use crate::utils::error::Result;
