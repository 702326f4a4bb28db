pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::config::toml_config::BatchOverrides;
use crate::core::ConfigProvider;
use crate::domain::model::InputMode;
use crate::domain::report::{BatchOutputFormat, RowErrorPolicy};
#[cfg(feature = "cli")]
use crate::utils::format::OutputFormat;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "ldl-calc", version)]
#[command(about = "Estimate LDL cholesterol (Friedewald formula) and classify the risk band")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Evaluate a single reading
    Calc(CalcArgs),
    /// Evaluate every reading in a CSV file
    Batch(BatchArgs),
    /// Interactive form: edit fields on stdin and watch the result update
    Form(FormArgs),
    /// Print the risk band table
    Bands,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct CalcArgs {
    /// Total cholesterol (mg/dL)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub total: String,

    /// HDL cholesterol (mg/dL)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pub hdl: String,

    /// Triglycerides (mg/dL)
    #[arg(long, alias = "triglycerides", default_value = "", allow_hyphen_values = true)]
    pub trig: String,

    #[command(flatten)]
    pub mode: ModeArgs,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// CSV file with total_cholesterol, hdl_cholesterol, triglycerides columns
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<BatchOutputFormat>,

    #[command(flatten)]
    pub mode: ModeArgs,

    /// Abort on the first invalid row (strict mode only)
    #[arg(long)]
    pub fail_fast: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct FormArgs {
    #[command(flatten)]
    pub mode: ModeArgs,
}

/// Input mode flags; any of them beats `[engine] mode`.
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Args)]
pub struct ModeArgs {
    #[arg(long, value_enum)]
    pub mode: Option<InputMode>,

    /// Reject values that are not numbers (same as --mode strict)
    #[arg(long, conflicts_with_all = ["mode", "lenient"])]
    pub strict: bool,

    /// Treat values that are not numbers as 0 (same as --mode lenient)
    #[arg(long, conflicts_with = "mode")]
    pub lenient: bool,
}

#[cfg(feature = "cli")]
impl ModeArgs {
    pub fn selected(&self) -> Option<InputMode> {
        if self.strict {
            Some(InputMode::Strict)
        } else if self.lenient {
            Some(InputMode::Lenient)
        } else {
            self.mode
        }
    }
}

#[cfg(feature = "cli")]
impl BatchArgs {
    pub fn into_overrides(self) -> BatchOverrides {
        BatchOverrides {
            mode: self.mode.selected(),
            fail_fast: self.fail_fast,
            output_format: self.format,
            input_path: self.input,
            output_path: self.output,
        }
    }
}

/// Fully resolved batch settings (config file plus command line overrides).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    pub mode: InputMode,
    pub input_path: String,
    pub output_path: String,
    pub output_format: BatchOutputFormat,
    pub on_invalid_row: RowErrorPolicy,
}

impl ConfigProvider for BatchSettings {
    fn input_mode(&self) -> InputMode {
        self.mode
    }

    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_format(&self) -> BatchOutputFormat {
        self.output_format
    }

    fn on_invalid_row(&self) -> RowErrorPolicy {
        self.on_invalid_row
    }
}
