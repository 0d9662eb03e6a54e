use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutListError {
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

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Unsupported input file: {path}")]
    UnsupportedInputError { path: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CutListError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CutListError::ConfigError { .. }
            | CutListError::MissingConfigError { .. }
            | CutListError::InvalidConfigValueError { .. }
            | CutListError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            CutListError::CsvError(_) | CutListError::UnsupportedInputError { .. } => {
                ErrorCategory::Input
            }
            CutListError::IoError(_) | CutListError::SerializationError(_) => {
                ErrorCategory::Output
            }
            CutListError::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Output => match self {
                CutListError::IoError(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                    ErrorSeverity::Medium
                }
                _ => ErrorSeverity::Critical,
            },
            ErrorCategory::Processing => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CutListError::CsvError(_) => {
                "Check that every row of the input CSV has the same number of columns".to_string()
            }
            CutListError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            CutListError::SerializationError(_) => {
                "Disable the json output format or report the failing input".to_string()
            }
            CutListError::ConfigError { .. } | CutListError::ConfigValidationError { .. } => {
                "Review the job file against the documented [job]/[input]/[output] layout"
                    .to_string()
            }
            CutListError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            CutListError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}'", field)
            }
            CutListError::UnsupportedInputError { .. } => {
                "Use a .csv cabinet list or a .toml job file".to_string()
            }
            CutListError::ProcessingError { .. } => "Re-run with --verbose for details".to_string(),
        }
    }

    /// Process exit code for a run that failed with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read cabinet specs: {}", self),
            ErrorCategory::Output => format!("Could not write the cut-list: {}", self),
            ErrorCategory::Processing => format!("Cut-list generation failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CutListError>;
