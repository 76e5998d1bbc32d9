use soap_client::SoapError;
use thiserror::Error;

use crate::operation::ValidationError;

/// High-level API errors for WeMo operations
///
/// Each variant corresponds to one stage of a call: sending the request,
/// checking the HTTP status, reading the body, or decoding what came back.
/// Invalid caller input is rejected before anything is sent.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network communication error
    ///
    /// The device could not be reached or the connection failed before a
    /// response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The device answered with a non-OK HTTP status
    #[error("Device returned status {code}: {body}")]
    Status { code: u16, body: String },

    /// The response body could not be read
    #[error("Read error: {0}")]
    Read(String),

    /// The response did not have the expected shape
    ///
    /// Covers a missing tag, a telemetry string with the wrong number of
    /// fields and similar structural mismatches.
    #[error("Format error: {0}")]
    Format(String),

    /// A single telemetry field could not be parsed as a number
    #[error("Failed to parse {field} in InsightParams: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// The XML payload is malformed
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid caller input, rejected before any request is sent
    #[error("Invalid parameter: {0}")]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Whether this error is one of the format-error kinds
    pub fn is_format(&self) -> bool {
        matches!(self, ApiError::Format(_) | ApiError::InvalidField { .. })
    }
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<SoapError> for ApiError {
    fn from(error: SoapError) -> Self {
        match error {
            SoapError::Network(msg) => ApiError::Transport(msg),
            SoapError::Read(msg) => ApiError::Read(msg),
        }
    }
}
