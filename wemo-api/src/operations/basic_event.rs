//! basicevent service: power state of switches and plugs

use crate::decode::pattern;
use crate::model::BinaryState;
use crate::operation::{Validate, ValidationError, WemoOperation};
use crate::{ApiError, Service};

/// GetBinaryState operation
pub struct GetBinaryStateOperation;

/// Request for GetBinaryState operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetBinaryStateRequest;

impl Validate for GetBinaryStateRequest {}

impl WemoOperation for GetBinaryStateOperation {
    type Request = GetBinaryStateRequest;
    type Response = BinaryState;

    const SERVICE: Service = Service::BasicEvent;
    const ACTION: &'static str = "GetBinaryState";

    fn build_payload(_request: &Self::Request) -> Result<String, ValidationError> {
        Ok("<BinaryState>1</BinaryState>".to_string())
    }

    fn parse_response(body: &str) -> Result<Self::Response, ApiError> {
        pattern::binary_state(body)
    }
}

/// SetBinaryState operation
pub struct SetBinaryStateOperation;

/// Request for SetBinaryState operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetBinaryStateRequest {
    pub on: bool,
}

impl Validate for SetBinaryStateRequest {}

impl WemoOperation for SetBinaryStateOperation {
    type Request = SetBinaryStateRequest;
    type Response = ();

    const SERVICE: Service = Service::BasicEvent;
    const ACTION: &'static str = "SetBinaryState";

    fn build_payload(request: &Self::Request) -> Result<String, ValidationError> {
        Ok(format!(
            "<BinaryState>{}</BinaryState>",
            BinaryState::from(request.on)
        ))
    }

    fn parse_response(_body: &str) -> Result<Self::Response, ApiError> {
        Ok(())
    }
}
