use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportingError {
    #[error("{message}")]
    ValidationError { message: String },

    #[error("API request failed: {message}")]
    ApiError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReportingError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// 是否為呼叫前的參數驗證錯誤
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// The server-side fault message, when this error wraps one.
    pub fn fault_message(&self) -> Option<&str> {
        match self {
            Self::ApiError { message } => Some(message),
            _ => None,
        }
    }
}

impl From<crate::domain::model::SoapFault> for ReportingError {
    fn from(fault: crate::domain::model::SoapFault) -> Self {
        Self::ApiError {
            message: fault.message,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportingError>;
