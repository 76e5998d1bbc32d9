//! WeMo SOAP operations, grouped by service

pub mod basic_event;
pub mod bridge;
pub mod insight;

pub use basic_event::{
    GetBinaryStateOperation, GetBinaryStateRequest, SetBinaryStateOperation, SetBinaryStateRequest,
};
pub use bridge::{
    BulbCommand, GetDeviceStatusOperation, GetDeviceStatusRequest, GetEndDevicesOperation,
    GetEndDevicesRequest, SetDeviceStatusOperation, SetDeviceStatusRequest,
};
pub use insight::{GetInsightParamsOperation, GetInsightParamsRequest};
