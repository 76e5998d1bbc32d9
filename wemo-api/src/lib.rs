//! High-level WeMo API for device control
//!
//! This crate talks to the SOAP control interface embedded in WeMo switches,
//! Insight plugs and Link bridges. It uses the private `soap-client` crate for
//! the HTTP exchange and decodes the replies into typed values.
//!
//! ```rust,no_run
//! use wemo_api::{Device, DEFAULT_SETUP_TIMEOUT};
//!
//! let device = Device::new("192.168.1.40:49153");
//! let info = device.fetch_device_info(DEFAULT_SETUP_TIMEOUT)?;
//! println!("{} is {}", info.friendly_name, device.get_binary_state());
//!
//! if info.is_bridge() {
//!     for bulb in &info.end_devices.end_device_info {
//!         println!("  {} ({})", bulb.friendly_name, bulb.device_id);
//!     }
//! }
//! # Ok::<(), wemo_api::ApiError>(())
//! ```

pub mod decode;
pub mod device;
pub mod error;
pub mod logging;
pub mod model;
pub mod operation;
pub mod operations;
pub mod service;

pub use device::{Device, DEFAULT_SETUP_TIMEOUT};
pub use error::{ApiError, Result};
pub use model::{
    BinaryState, BulbStatusMap, DeviceInfo, DeviceInfos, EndDeviceInfo, EndDevices, InsightParams,
    BRIDGE_DEVICE_TYPE,
};
pub use operation::{ValidationError, WemoOperation};
pub use operations::BulbCommand;
pub use service::Service;
pub use soap_client::{SoapClient, SoapClientConfig};
