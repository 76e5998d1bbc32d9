use std::time::Duration;

use soap_client::{SoapClient, SoapResponse};
use tracing::{debug, error, warn};

use crate::model::{BinaryState, BulbStatusMap, DeviceInfo, EndDevices, InsightParams};
use crate::operation::{encode, WemoOperation};
use crate::operations::{
    BulbCommand, GetBinaryStateOperation, GetBinaryStateRequest, GetDeviceStatusOperation,
    GetDeviceStatusRequest, GetEndDevicesOperation, GetEndDevicesRequest,
    GetInsightParamsOperation, GetInsightParamsRequest, SetBinaryStateOperation,
    SetBinaryStateRequest, SetDeviceStatusOperation, SetDeviceStatusRequest,
};
use crate::{ApiError, Result};

/// Suggested bound for [`Device::fetch_device_info`]
pub const DEFAULT_SETUP_TIMEOUT: Duration = Duration::from_secs(5);

/// A single WeMo device addressed by host
///
/// The device is a small value object: it holds the address it was created
/// with and the SOAP client used to reach it, and nothing else. Every call is
/// an independent round-trip, so a `Device` can be cloned and shared freely.
///
/// Reads come in two flavours. [`get_binary_state`](Self::get_binary_state)
/// and [`get_bridge_end_devices`](Self::get_bridge_end_devices) are
/// best-effort: failures are logged and a sentinel or empty value is
/// returned. Everything else returns a [`Result`].
///
/// ```rust,no_run
/// use wemo_api::Device;
///
/// let device = Device::new("192.168.1.40:49153");
/// if device.get_binary_state().is_unknown() {
///     eprintln!("device did not answer");
/// }
/// device.toggle();
/// ```
#[derive(Debug, Clone)]
pub struct Device {
    host: String,
    soap_client: SoapClient,
}

impl Device {
    /// Create a device handle for `host[:port]` with a default SOAP client
    pub fn new(host: impl Into<String>) -> Self {
        Self::with_client(host, SoapClient::new())
    }

    /// Create a device handle with a custom SOAP client
    pub fn with_client(host: impl Into<String>, soap_client: SoapClient) -> Self {
        Self {
            host: host.into(),
            soap_client,
        }
    }

    /// The `host[:port]` this device was created with
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Fetch and decode the device descriptor (`setup.xml`)
    ///
    /// For a bridge, the paired end-devices are fetched as well; that second
    /// call is best-effort and never fails the descriptor fetch.
    ///
    /// # Arguments
    /// * `timeout` - Upper bound for the descriptor request
    pub fn fetch_device_info(&self, timeout: Duration) -> Result<DeviceInfo> {
        let url = format!("http://{}/setup.xml", self.host);
        let response = self.soap_client.get(&url, timeout)?;

        if !response.is_ok() {
            warn!(host = %self.host, status = response.status(), "setup.xml returned non-OK status");
        }

        let body = response.into_string()?;
        let mut info = DeviceInfo::from_setup_xml(&body)?;

        if info.is_bridge() {
            info.end_devices = self.get_bridge_end_devices(&info.udn);
        }

        Ok(info)
    }

    /// Read the power state
    ///
    /// Returns [`BinaryState::UNKNOWN`] when the state could not be read for
    /// any reason; the cause is logged.
    pub fn get_binary_state(&self) -> BinaryState {
        match self.execute::<GetBinaryStateOperation>(&GetBinaryStateRequest) {
            Ok(state) => state,
            Err(e) => {
                warn!(host = %self.host, error = %e, "unable to fetch BinaryState");
                BinaryState::UNKNOWN
            }
        }
    }

    /// Switch on, logging any failure
    pub fn on(&self) {
        let _ = self.change_state(true);
    }

    /// Switch off, logging any failure
    pub fn off(&self) {
        let _ = self.change_state(false);
    }

    /// Switch on or off and report failures to the caller
    pub fn set_state(&self, on: bool) -> Result<()> {
        self.change_state(on)
    }

    /// Flip the power state
    ///
    /// Turns the device on only when it reads as off; an unknown state is
    /// treated as on. Failures are logged and otherwise ignored.
    pub fn toggle(&self) {
        if self.get_binary_state() == BinaryState::OFF {
            self.on();
        } else {
            self.off();
        }
    }

    fn change_state(&self, on: bool) -> Result<()> {
        self.execute::<SetBinaryStateOperation>(&SetBinaryStateRequest { on })
            .inspect_err(|e| {
                error!(host = %self.host, on, error = %e, "unable to SetBinaryState");
            })
    }

    /// Read the Insight power usage telemetry
    pub fn get_insight_params(&self) -> Result<InsightParams> {
        self.execute::<GetInsightParamsOperation>(&GetInsightParamsRequest)
    }

    /// List the end-devices paired with a bridge
    ///
    /// Best-effort: failures are logged and whatever could be decoded is
    /// returned, which may be an empty list. An empty list does not prove the
    /// bridge has no devices.
    pub fn get_bridge_end_devices(&self, udn: &str) -> EndDevices {
        let request = GetEndDevicesRequest {
            udn: udn.to_string(),
        };

        let response = match self.send::<GetEndDevicesOperation>(&request) {
            Ok(response) => response,
            Err(e) => {
                warn!(host = %self.host, error = %e, "unable to fetch bridge end devices");
                return EndDevices::default();
            }
        };

        if !response.is_ok() {
            warn!(host = %self.host, status = response.status(), "GetEndDevices returned non-OK status");
        }

        let body = match response.into_string() {
            Ok(body) => body,
            Err(e) => {
                warn!(host = %self.host, error = %e, "unable to read end devices");
                return EndDevices::default();
            }
        };

        GetEndDevicesOperation::parse_response(&body).unwrap_or_else(|e| {
            warn!(host = %self.host, error = %e, "unable to decode end devices");
            EndDevices::default()
        })
    }

    /// Send a command to a bulb or bulb group attached to a bridge
    ///
    /// The request is validated before anything is sent: an empty id, or a
    /// dim level that is not an integer in `0..=255`, is rejected.
    pub fn bulb(&self, id: &str, command: BulbCommand, value: &str, group: bool) -> Result<()> {
        let request = SetDeviceStatusRequest {
            device_id: id.to_string(),
            command,
            value: value.to_string(),
            group,
        };
        self.execute::<SetDeviceStatusOperation>(&request)
    }

    /// Read the raw capability values of one or more bulbs
    pub fn get_bulb_status<S: AsRef<str>>(&self, ids: &[S]) -> Result<BulbStatusMap> {
        let request = GetDeviceStatusRequest {
            device_ids: ids.iter().map(|id| id.as_ref().to_string()).collect(),
        };
        self.execute::<GetDeviceStatusOperation>(&request)
            .map(|list| list.into_map())
    }

    /// Encode and post a request, returning the raw reply
    fn send<Op: WemoOperation>(&self, request: &Op::Request) -> Result<SoapResponse> {
        let encoded = encode::<Op>(request)?;
        let metadata = Op::metadata();

        debug!(host = %self.host, service = metadata.service, action = metadata.action, "sending request");

        Ok(self
            .soap_client
            .post(&self.host, encoded.service.name(), encoded.action, &encoded.body)?)
    }

    /// Encode, post, require `200 OK`, then decode the reply
    fn execute<Op: WemoOperation>(&self, request: &Op::Request) -> Result<Op::Response> {
        let response = self.send::<Op>(request)?;

        if !response.is_ok() {
            let code = response.status();
            let body = response.into_string().unwrap_or_default();
            return Err(ApiError::Status { code, body });
        }

        let body = response.into_string()?;
        Op::parse_response(&body)
    }
}
