//! Operation framework: request encoding and response decoding per SOAP action
//!
//! Every WeMo action is a zero-sized type implementing [`WemoOperation`]. The
//! trait ties together the service the action belongs to, the action name,
//! how a typed request becomes the XML payload, and how the raw reply body is
//! decoded. [`encode`] wraps the payload in the SOAP envelope; it never
//! touches the network.

use crate::error::ApiError;
use crate::service::Service;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' value '{value}' is out of range ({min}..={max})")]
    RangeError {
        parameter: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Parameter '{parameter}' value '{value}' is invalid: {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Required parameter '{parameter}' is missing")]
    MissingParameter { parameter: String },
}

impl ValidationError {
    pub fn range_error(
        parameter: &str,
        min: impl std::fmt::Display,
        max: impl std::fmt::Display,
        value: impl std::fmt::Display,
    ) -> Self {
        Self::RangeError {
            parameter: parameter.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn invalid_value(
        parameter: &str,
        value: impl std::fmt::Display,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn missing(parameter: &str) -> Self {
        Self::MissingParameter {
            parameter: parameter.to_string(),
        }
    }
}

/// Trait for request types that can be validated before encoding
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A single SOAP action understood by WeMo firmware
pub trait WemoOperation {
    /// The request type for this operation
    type Request: Validate;

    /// The decoded response type
    type Response;

    /// The service this operation belongs to
    const SERVICE: Service;

    /// The SOAP action name for this operation
    const ACTION: &'static str;

    /// Build the XML payload that goes inside the action element
    ///
    /// Implementations validate the request first; an invalid request never
    /// produces a payload.
    fn build_payload(request: &Self::Request) -> Result<String, ValidationError>;

    /// Decode the raw reply body into the typed response
    fn parse_response(body: &str) -> Result<Self::Response, ApiError>;

    fn metadata() -> OperationMetadata {
        OperationMetadata {
            service: Self::SERVICE.name(),
            action: Self::ACTION,
        }
    }
}

/// Metadata about an operation, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationMetadata {
    /// The service type (e.g., "basicevent")
    pub service: &'static str,
    /// The action name (e.g., "GetBinaryState")
    pub action: &'static str,
}

/// A fully encoded request, ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRequest {
    pub service: Service,
    pub action: &'static str,
    /// Complete SOAP envelope
    pub body: String,
}

/// Encode a request for `Op` into its SOAP envelope and action name
pub fn encode<Op: WemoOperation>(request: &Op::Request) -> Result<EncodedRequest, ValidationError> {
    let payload = Op::build_payload(request)?;
    Ok(EncodedRequest {
        service: Op::SERVICE,
        action: Op::ACTION,
        body: soap_client::envelope(Op::SERVICE.name(), Op::ACTION, &payload),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoOperation;

    struct EchoRequest {
        text: String,
    }

    impl Validate for EchoRequest {
        fn validate(&self) -> Result<(), ValidationError> {
            if self.text.is_empty() {
                return Err(ValidationError::missing("text"));
            }
            Ok(())
        }
    }

    impl WemoOperation for EchoOperation {
        type Request = EchoRequest;
        type Response = String;

        const SERVICE: Service = Service::BasicEvent;
        const ACTION: &'static str = "Echo";

        fn build_payload(request: &Self::Request) -> Result<String, ValidationError> {
            request.validate()?;
            Ok(format!("<Text>{}</Text>", request.text))
        }

        fn parse_response(body: &str) -> Result<Self::Response, ApiError> {
            Ok(body.to_string())
        }
    }

    #[test]
    fn test_encode_wraps_payload() {
        let encoded = encode::<EchoOperation>(&EchoRequest {
            text: "hi".to_string(),
        })
        .unwrap();

        assert_eq!(encoded.service, Service::BasicEvent);
        assert_eq!(encoded.action, "Echo");
        assert!(encoded
            .body
            .contains(r#"<u:Echo xmlns:u="urn:Belkin:service:basicevent:1"><Text>hi</Text></u:Echo>"#));
    }

    #[test]
    fn test_encode_rejects_invalid_request() {
        let result = encode::<EchoOperation>(&EchoRequest {
            text: String::new(),
        });
        assert_eq!(result, Err(ValidationError::missing("text")));
    }

    #[test]
    fn test_metadata() {
        let metadata = EchoOperation::metadata();
        assert_eq!(metadata.service, "basicevent");
        assert_eq!(metadata.action, "Echo");
    }

    #[test]
    fn test_range_error_display() {
        let error = ValidationError::range_error("value", 0, 255, 300);
        assert_eq!(
            error.to_string(),
            "Parameter 'value' value '300' is out of range (0..=255)"
        );
    }
}
