use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API request to {url} failed with status: {status}")]
    ApiStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Record is missing required field: {field}")]
    MissingField { field: String },

    #[error("No converter registered for mapping type: {mapping_type}")]
    UnsupportedType { mapping_type: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl UploadError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            UploadError::ApiError(_) | UploadError::ApiStatusError { .. } => ErrorCategory::Network,
            UploadError::CsvError(_)
            | UploadError::SerializationError(_)
            | UploadError::MissingField { .. } => ErrorCategory::Data,
            UploadError::UrlError(_)
            | UploadError::ConfigError { .. }
            | UploadError::ConfigValidationError { .. }
            | UploadError::InvalidConfigValueError { .. }
            | UploadError::MissingConfigError { .. }
            | UploadError::UnsupportedType { .. } => ErrorCategory::Configuration,
            UploadError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            UploadError::ApiError(_) => "Could not reach the LMIS API".to_string(),
            UploadError::ApiStatusError { status, .. } => {
                format!("The LMIS API rejected the request (HTTP {})", status)
            }
            UploadError::MissingField { field } => {
                format!("Input record has no '{}' value", field)
            }
            UploadError::UnsupportedType { mapping_type } => {
                format!("Mapping type '{}' is not supported", mapping_type)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the API base URL, access token and network connectivity",
            ErrorCategory::Data => "Check the input file columns against the configured mappings",
            ErrorCategory::Configuration => "Fix the configuration file and run again",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
