use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReproError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} rejected by API ({status}): {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Remote,
    Data,
    System,
}

impl ReproError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReproError::MissingConfig { .. }
            | ReproError::InvalidConfigValue { .. }
            | ReproError::ConfigParse { .. } => ErrorCategory::Configuration,
            ReproError::Http(_) | ReproError::Api { .. } => ErrorCategory::Remote,
            ReproError::Serialization(_) => ErrorCategory::Data,
            ReproError::Io(_) => ErrorCategory::System,
        }
    }

    /// Every failure ends the run with the same status.
    pub fn exit_code(&self) -> i32 {
        1
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReproError::MissingConfig { field } => format!(
                "Please set the SHIPPO_API_KEY, CARRIER_ACCOUNT_ID, and FROM_ADDRESS_ID environment variables ({} is missing)",
                field
            ),
            ReproError::Api {
                operation, status, ..
            } => format!("Shippo rejected the {} request (HTTP {})", operation, status),
            ReproError::Http(e) if e.is_timeout() => {
                "The request to Shippo timed out".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Export the missing variable, pass it as a flag, or add it to the --config file"
            }
            ErrorCategory::Remote => {
                "Check the API key, carrier account and network access; the response body above has the details"
            }
            ErrorCategory::Data => "The API returned a payload of an unexpected shape",
            ErrorCategory::System => "Check file permissions and paths",
        }
    }
}

pub type Result<T> = std::result::Result<T, ReproError>;
