use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShapeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

/// 錯誤分類，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Io,
    Data,
}

impl ShapeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ShapeError::ConfigError { .. }
            | ShapeError::ConfigValidationError { .. }
            | ShapeError::InvalidConfigValueError { .. }
            | ShapeError::MissingConfigError { .. } => ErrorCategory::Config,
            ShapeError::IoError(_) => ErrorCategory::Io,
            ShapeError::SerializationError(_)
            | ShapeError::CsvError(_)
            | ShapeError::ProcessingError { .. } => ErrorCategory::Data,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Config => 1,
            ErrorCategory::Io | ErrorCategory::Data => 2,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ShapeError::IoError(_) => "Check that the input file exists and the output directory is writable",
            ShapeError::SerializationError(_) => "Make sure the input is a valid JSON document",
            ShapeError::CsvError(_) => "Check the output format settings",
            ShapeError::ConfigError { .. } | ShapeError::ConfigValidationError { .. } => {
                "Check the TOML configuration file syntax"
            }
            ShapeError::InvalidConfigValueError { .. } => "Fix the highlighted configuration value",
            ShapeError::MissingConfigError { .. } => "Provide the missing setting via CLI flag or config file",
            ShapeError::ProcessingError { .. } => "Re-run with --verbose for more details",
        }
    }
}

pub type Result<T> = std::result::Result<T, ShapeError>;
