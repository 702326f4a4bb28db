pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::form::{FormSession, FormView};
pub use app::pipelines::CsvPipeline;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, BatchSettings};
pub use core::{batch::BatchEngine, engine::LdlEngine};
pub use domain::model::{
    Classification, Field, InputMode, LabReading, LdlResult, RawReading, RiskBand,
};
pub use utils::error::{LdlError, Result};
