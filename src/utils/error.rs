use thiserror::Error;

/// Network-layer failure reported by a transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("request timed out")]
    Timeout,
}

/// Failure of a single market client call.
///
/// Every failure path of the client ends in one of these values; nothing is
/// retried or swallowed on the way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("response body is empty")]
    EmptyBody,

    #[error("failed to decode response: {0}")]
    DecodeFailure(String),

    #[error("transport failure: {0}")]
    Transport(#[from] TransportFailure),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Market API error: {0}")]
    Client(#[from] ClientError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, AppError>;
