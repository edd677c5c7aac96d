//! Error types for the strategy scanner

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    pub fn method_not_allowed(method: impl Into<String>) -> Self {
        Self::MethodNotAllowed(method.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP-equivalent status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ScanError::MethodNotAllowed(_) => 405,
            ScanError::InvalidInput(_) => 400,
            _ => 500,
        }
    }

    /// Message safe to hand back to a caller.
    ///
    /// Client errors are reported verbatim; everything else collapses to a
    /// generic message.
    pub fn public_message(&self) -> String {
        match self {
            ScanError::MethodNotAllowed(_) => "Method not allowed".to_string(),
            ScanError::InvalidInput(msg) => msg.clone(),
            _ => "Internal server error".to_string(),
        }
    }
}
