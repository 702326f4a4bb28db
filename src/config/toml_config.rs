use crate::config::BatchSettings;
use crate::domain::model::InputMode;
use crate::domain::report::{BatchOutputFormat, RowErrorPolicy};
use crate::utils::error::{LdlError, Result};
use crate::utils::format::{DisplayOptions, OutputFormat};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Every section is optional; missing keys fall back to the defaults below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub engine: EngineConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: InputMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub precision: usize,
    pub grouping: bool,
    pub unclassified_label: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        let display = DisplayOptions::default();
        Self {
            format: OutputFormat::default(),
            precision: display.precision,
            grouping: display.grouping,
            unclassified_label: display.unclassified_label,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub input_path: Option<String>,
    /// Defaults to `ldl_results.<format>` in the working directory.
    pub output_path: Option<String>,
    pub output_format: BatchOutputFormat,
    pub on_invalid_row: RowErrorPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: bool,
}

/// Command line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOverrides {
    pub mode: Option<InputMode>,
    pub fail_fast: bool,
    pub output_format: Option<BatchOutputFormat>,
    pub input_path: Option<String>,
    pub output_path: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LdlError::IoError)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LdlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LdlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            precision: self.output.precision,
            grouping: self.output.grouping,
            unclassified_label: self.output.unclassified_label.clone(),
        }
    }

    pub fn batch_output_path(&self) -> String {
        self.batch.output_path.clone().unwrap_or_else(|| {
            format!("ldl_results.{}", self.batch.output_format.extension())
        })
    }

    /// The command line mode if one was given, else `[engine] mode`.
    pub fn input_mode(&self, override_mode: Option<InputMode>) -> InputMode {
        override_mode.unwrap_or(self.engine.mode)
    }

    pub fn apply_batch_overrides(&mut self, overrides: BatchOverrides) {
        self.engine.mode = self.input_mode(overrides.mode);
        if overrides.fail_fast {
            self.batch.on_invalid_row = RowErrorPolicy::Fail;
        }
        if let Some(format) = overrides.output_format {
            self.batch.output_format = format;
        }
        if overrides.input_path.is_some() {
            self.batch.input_path = overrides.input_path;
        }
        if overrides.output_path.is_some() {
            self.batch.output_path = overrides.output_path;
        }
    }

    pub fn batch_settings(&self) -> Result<BatchSettings> {
        let input_path =
            validation::validate_required_field("batch.input_path", &self.batch.input_path)?;
        Ok(BatchSettings {
            mode: self.engine.mode,
            input_path: input_path.clone(),
            output_path: self.batch_output_path(),
            output_format: self.batch.output_format,
            on_invalid_row: self.batch.on_invalid_row,
        })
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range("output.precision", self.output.precision, 0, 15)?;

        if let Some(input_path) = &self.batch.input_path {
            validation::validate_path("batch.input_path", input_path)?;
        }
        if let Some(output_path) = &self.batch.output_path {
            validation::validate_path("batch.output_path", output_path)?;
        }
        if let Some(level) = &self.logging.level {
            validation::validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }
}
