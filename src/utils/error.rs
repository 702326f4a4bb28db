use thiserror::Error;

#[derive(Error, Debug)]
pub enum LdlError {
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: String, value: String },

    #[error("Non-finite value for {field}: '{value}'")]
    NonFiniteValue { field: String, value: String },

    #[error("Unknown field: '{name}'")]
    UnknownField { name: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LdlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LdlError::InvalidNumber { .. }
            | LdlError::NonFiniteValue { .. }
            | LdlError::UnknownField { .. } => ErrorCategory::Input,
            LdlError::ConfigError { .. }
            | LdlError::MissingConfigError { .. }
            | LdlError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LdlError::IoError(_) => ErrorCategory::Io,
            LdlError::CsvError(_)
            | LdlError::SerializationError(_)
            | LdlError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Processing => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Process exit code used by the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Processing => 1,
            ErrorCategory::Configuration => 2,
            ErrorCategory::Io => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LdlError::InvalidNumber { field, value } if value.trim().is_empty() => {
                format!("{} is empty", field)
            }
            LdlError::InvalidNumber { field, value } => {
                format!("{} is not a number: '{}'", field, value)
            }
            LdlError::NonFiniteValue { field, .. } => {
                format!("{} must be a finite number", field)
            }
            LdlError::UnknownField { name } => format!("'{}' is not a form field", name),
            LdlError::IoError(e) => format!("File access failed: {}", e),
            LdlError::CsvError(e) => format!("Could not read the CSV data: {}", e),
            LdlError::SerializationError(e) => format!("Could not produce JSON output: {}", e),
            LdlError::ConfigError { message } => format!("Configuration problem: {}", message),
            LdlError::MissingConfigError { field } => {
                format!("Configuration value '{}' is required", field)
            }
            LdlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            LdlError::ProcessingError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LdlError::InvalidNumber { .. } | LdlError::NonFiniteValue { .. } => {
                "Enter the lab value in mg/dL as a plain decimal number, or run without --strict"
            }
            LdlError::UnknownField { .. } => "Use one of: total, hdl, trig",
            LdlError::IoError(_) => "Check that the path exists and is readable/writable",
            LdlError::CsvError(_) => {
                "Make sure the file has a header row with total_cholesterol, hdl_cholesterol, triglycerides"
            }
            LdlError::SerializationError(_) => "Retry with --format text",
            LdlError::ConfigError { .. }
            | LdlError::MissingConfigError { .. }
            | LdlError::InvalidConfigValueError { .. } => {
                "Check the TOML configuration file against the documented sections"
            }
            LdlError::ProcessingError { .. } => {
                "Fix the offending rows or switch on_invalid_row to \"skip\""
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LdlError>;
