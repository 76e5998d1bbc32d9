//! Typed values decoded from WeMo replies

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decode;
use crate::error::Result;

/// Device type advertised by a WeMo Link bridge
pub const BRIDGE_DEVICE_TYPE: &str = "urn:Belkin:device:bridge:1";

/// Identity and capability snapshot of a device, decoded from `setup.xml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceInfo {
    #[serde(rename(deserialize = "deviceType", serialize = "device-type"))]
    pub device_type: String,
    #[serde(rename(deserialize = "friendlyName", serialize = "friendly-name"))]
    pub friendly_name: String,
    #[serde(rename(deserialize = "macAddress", serialize = "mac-address"))]
    pub mac_address: String,
    #[serde(rename(deserialize = "firmwareVersion", serialize = "firmware-version"))]
    pub firmware_version: String,
    #[serde(rename(deserialize = "serialNumber", serialize = "serial-number"))]
    pub serial_number: String,
    #[serde(rename = "UDN")]
    pub udn: String,
    /// Populated only for bridges
    #[serde(skip_deserializing, rename = "EndDevices")]
    pub end_devices: EndDevices,
}

/// `setup.xml` root element
#[derive(Debug, Default, Deserialize)]
struct SetupRoot {
    #[serde(default)]
    device: DeviceInfo,
}

impl DeviceInfo {
    /// Parse a device descriptor (`setup.xml`)
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Decode` if the XML is malformed. A well-formed
    /// document without a `device` element yields empty fields.
    pub fn from_setup_xml(xml: &str) -> Result<Self> {
        let root: SetupRoot = decode::parse(xml)?;
        Ok(root.device)
    }

    /// Whether this descriptor belongs to a bridge that fronts end-devices
    pub fn is_bridge(&self) -> bool {
        self.device_type == BRIDGE_DEVICE_TYPE
    }
}

/// A collection of device descriptors
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DeviceInfos(pub Vec<DeviceInfo>);

impl DeviceInfos {
    /// Sort in place by friendly name
    pub fn sort_by_name(&mut self) {
        self.0.sort_by(|a, b| a.friendly_name.cmp(&b.friendly_name));
    }
}

impl From<Vec<DeviceInfo>> for DeviceInfos {
    fn from(infos: Vec<DeviceInfo>) -> Self {
        Self(infos)
    }
}

impl IntoIterator for DeviceInfos {
    type Item = DeviceInfo;
    type IntoIter = std::vec::IntoIter<DeviceInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Power state reported by `GetBinaryState`
///
/// `0` is off, `1` is on and `-1` means the state could not be read. Other
/// values the firmware reports (Insight plugs use `8` for standby) are kept
/// as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BinaryState(i32);

impl BinaryState {
    pub const OFF: BinaryState = BinaryState(0);
    pub const ON: BinaryState = BinaryState(1);
    pub const UNKNOWN: BinaryState = BinaryState(-1);

    /// Wrap a raw value as reported by the firmware
    pub fn new(value: i32) -> Self {
        Self(value)
    }

    /// The raw integer value
    pub fn value(self) -> i32 {
        self.0
    }

    /// Whether the state could not be read
    pub fn is_unknown(self) -> bool {
        self == Self::UNKNOWN
    }
}

impl From<bool> for BinaryState {
    fn from(on: bool) -> Self {
        if on {
            Self::ON
        } else {
            Self::OFF
        }
    }
}

impl fmt::Display for BinaryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Power usage telemetry from an Insight plug
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InsightParams {
    /// Seconds on in the current session
    pub on_for: i64,
    /// Seconds on today
    pub on_today: i64,
    /// Seconds on in total
    pub on_total: i64,
    /// RSSI
    pub wifi_strength: f64,
    /// mW
    pub current_power: f64,
    /// mW
    pub today_power: f64,
    /// mW
    pub total_power: f64,
    /// mW
    pub power_threshold: f64,
}

/// End-devices paired with a bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EndDevices {
    #[serde(rename = "DeviceListType")]
    pub device_list_type: String,
    #[serde(rename = "EndDeviceInfo")]
    pub end_device_info: Vec<EndDeviceInfo>,
}

impl EndDevices {
    pub fn is_empty(&self) -> bool {
        self.end_device_info.is_empty()
    }

    pub fn len(&self) -> usize {
        self.end_device_info.len()
    }
}

/// One device attached to a bridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndDeviceInfo {
    #[serde(rename = "DeviceIndex")]
    pub device_index: String,
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    #[serde(rename = "FriendlyName")]
    pub friendly_name: String,
    #[serde(rename = "FirmwareVersion")]
    pub firmware_version: String,
    #[serde(rename = "CapabilityIDs")]
    pub capability_ids: String,
    #[serde(rename = "CurrentState")]
    pub current_state: String,
    #[serde(rename = "Manufacturer")]
    pub manufacturer: String,
    #[serde(rename = "ModelCode")]
    pub model_code: String,
    #[serde(rename(deserialize = "productName", serialize = "ProductName"))]
    pub product_name: String,
    #[serde(rename = "WeMoCertified")]
    pub wemo_certified: String,
}

// Body>GetEndDevicesResponse>DeviceLists>DeviceLists>DeviceList>DeviceInfos>DeviceInfo

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct EndDevicesEnvelope {
    #[serde(rename = "Body")]
    body: EndDevicesBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EndDevicesBody {
    #[serde(rename = "GetEndDevicesResponse")]
    response: GetEndDevicesResponse,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GetEndDevicesResponse {
    #[serde(rename = "DeviceLists")]
    payload: NestedDeviceLists,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NestedDeviceLists {
    #[serde(rename = "DeviceLists")]
    lists: DeviceLists,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeviceLists {
    #[serde(rename = "DeviceList")]
    device_list: Vec<DeviceList>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeviceList {
    #[serde(rename = "DeviceListType")]
    device_list_type: String,
    #[serde(rename = "DeviceInfos")]
    device_infos: DeviceInfoList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeviceInfoList {
    #[serde(rename = "DeviceInfo")]
    device_info: Vec<EndDeviceInfo>,
}

impl From<EndDevicesEnvelope> for EndDevices {
    fn from(envelope: EndDevicesEnvelope) -> Self {
        let lists = envelope.body.response.payload.lists.device_list;
        let device_list_type = lists
            .first()
            .map(|list| list.device_list_type.clone())
            .unwrap_or_default();
        let end_device_info = lists
            .into_iter()
            .flat_map(|list| list.device_infos.device_info)
            .collect();

        EndDevices {
            device_list_type,
            end_device_info,
        }
    }
}

/// Device id to raw capability value, as reported by `GetDeviceStatus`
pub type BulbStatusMap = HashMap<String, String>;

/// One entry of a `GetDeviceStatus` reply
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceStatus {
    #[serde(rename = "DeviceID")]
    pub device_id: String,
    #[serde(rename = "CapabilityValue")]
    pub capability_value: String,
}

/// Decoded `GetDeviceStatus` reply, in document order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulbStatusList {
    pub device_status: Vec<DeviceStatus>,
}

impl BulbStatusList {
    /// Fold into a map; a repeated device id keeps its last value
    pub fn into_map(self) -> BulbStatusMap {
        self.device_status
            .into_iter()
            .map(|status| (status.device_id, status.capability_value))
            .collect()
    }
}

// Body>GetDeviceStatusResponse>DeviceStatusList>DeviceStatusList>DeviceStatus

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct BulbStatusEnvelope {
    #[serde(rename = "Body")]
    body: BulbStatusBody,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BulbStatusBody {
    #[serde(rename = "GetDeviceStatusResponse")]
    response: GetDeviceStatusResponse,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GetDeviceStatusResponse {
    #[serde(rename = "DeviceStatusList")]
    payload: NestedDeviceStatusList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NestedDeviceStatusList {
    #[serde(rename = "DeviceStatusList")]
    list: DeviceStatusList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeviceStatusList {
    #[serde(rename = "DeviceStatus")]
    device_status: Vec<DeviceStatus>,
}

impl From<BulbStatusEnvelope> for BulbStatusList {
    fn from(envelope: BulbStatusEnvelope) -> Self {
        BulbStatusList {
            device_status: envelope.body.response.payload.list.device_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWITCH_SETUP: &str = r#"<?xml version="1.0"?>
<root xmlns="urn:Belkin:device-1-0">
  <specVersion><major>1</major><minor>0</minor></specVersion>
  <device>
    <deviceType>urn:Belkin:device:controllee:1</deviceType>
    <friendlyName>Desk Lamp</friendlyName>
    <manufacturer>Belkin International Inc.</manufacturer>
    <modelName>Socket</modelName>
    <serialNumber>221517K0101769</serialNumber>
    <UDN>uuid:Socket-1_0-221517K0101769</UDN>
    <macAddress>EC1A59F1B2C3</macAddress>
    <firmwareVersion>WeMo_WW_2.00.11057.PVT-OWRT-SNS</firmwareVersion>
    <serviceList>
      <service><serviceType>urn:Belkin:service:basicevent:1</serviceType></service>
    </serviceList>
  </device>
</root>"#;

    #[test]
    fn test_device_info_from_setup_xml() {
        let info = DeviceInfo::from_setup_xml(SWITCH_SETUP).unwrap();

        assert_eq!(info.device_type, "urn:Belkin:device:controllee:1");
        assert_eq!(info.friendly_name, "Desk Lamp");
        assert_eq!(info.mac_address, "EC1A59F1B2C3");
        assert_eq!(info.firmware_version, "WeMo_WW_2.00.11057.PVT-OWRT-SNS");
        assert_eq!(info.serial_number, "221517K0101769");
        assert_eq!(info.udn, "uuid:Socket-1_0-221517K0101769");
        assert!(!info.is_bridge());
        assert_eq!(info.end_devices, EndDevices::default());
    }

    #[test]
    fn test_device_info_absent_fields_are_empty() {
        let xml = r#"<root><device><friendlyName>Bare</friendlyName></device></root>"#;
        let info = DeviceInfo::from_setup_xml(xml).unwrap();

        assert_eq!(info.friendly_name, "Bare");
        assert_eq!(info.mac_address, "");
        assert_eq!(info.udn, "");
    }

    #[test]
    fn test_device_info_malformed() {
        let xml = r#"<root><device><friendlyName>Broken</device></root>"#;
        assert!(matches!(
            DeviceInfo::from_setup_xml(xml),
            Err(crate::ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_device_info_json_keys() {
        let info = DeviceInfo::from_setup_xml(SWITCH_SETUP).unwrap();
        let json = serde_json::to_value(&info).unwrap();

        assert_eq!(json["device-type"], "urn:Belkin:device:controllee:1");
        assert_eq!(json["friendly-name"], "Desk Lamp");
        assert_eq!(json["mac-address"], "EC1A59F1B2C3");
        assert_eq!(json["serial-number"], "221517K0101769");
        assert_eq!(json["UDN"], "uuid:Socket-1_0-221517K0101769");
        assert!(json["EndDevices"]["EndDeviceInfo"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_device_infos_sort_by_name() {
        let named = |name: &str| DeviceInfo {
            friendly_name: name.to_string(),
            ..Default::default()
        };
        let mut infos = DeviceInfos::from(vec![named("Porch"), named("Bedroom"), named("Kitchen")]);
        infos.sort_by_name();

        let names: Vec<String> = infos.into_iter().map(|i| i.friendly_name).collect();
        assert_eq!(names, vec!["Bedroom", "Kitchen", "Porch"]);
    }

    #[test]
    fn test_binary_state_constants() {
        assert_eq!(BinaryState::from(true), BinaryState::ON);
        assert_eq!(BinaryState::from(false), BinaryState::OFF);
        assert!(BinaryState::UNKNOWN.is_unknown());
        assert_eq!(BinaryState::new(8).value(), 8);
        assert_eq!(BinaryState::UNKNOWN.to_string(), "-1");
    }

    #[test]
    fn test_bulb_status_into_map_last_wins() {
        let status = |id: &str, value: &str| DeviceStatus {
            device_id: id.to_string(),
            capability_value: value.to_string(),
        };
        let list = BulbStatusList {
            device_status: vec![status("A", "1,255:0"), status("B", "0,128:0"), status("A", "0,10:0")],
        };

        let map = list.into_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["A"], "0,10:0");
        assert_eq!(map["B"], "0,128:0");
    }
}
