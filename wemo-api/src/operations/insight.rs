//! insight service: power usage telemetry

use crate::decode::pattern;
use crate::model::InsightParams;
use crate::operation::{Validate, ValidationError, WemoOperation};
use crate::{ApiError, Service};

/// GetInsightParams operation
pub struct GetInsightParamsOperation;

/// Request for GetInsightParams operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetInsightParamsRequest;

impl Validate for GetInsightParamsRequest {}

impl WemoOperation for GetInsightParamsOperation {
    type Request = GetInsightParamsRequest;
    type Response = InsightParams;

    const SERVICE: Service = Service::Insight;
    const ACTION: &'static str = "GetInsightParams";

    fn build_payload(_request: &Self::Request) -> Result<String, ValidationError> {
        Ok(String::new())
    }

    fn parse_response(body: &str) -> Result<Self::Response, ApiError> {
        pattern::insight_params(body)
    }
}
