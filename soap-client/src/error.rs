//! Error types for the SOAP client

use thiserror::Error;

/// Errors that can occur during SOAP communication
///
/// A non-2xx HTTP status is not an error at this layer; it is returned in the
/// [`SoapResponse`](crate::SoapResponse) for the caller to interpret.
#[derive(Debug, Error)]
pub enum SoapError {
    /// Connection, DNS or timeout failure before a response was received
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The response body could not be read
    #[error("Body read error: {0}")]
    Read(String),
}
