//! bridge service: end-devices (bulbs) paired with a WeMo Link
//!
//! Requests and replies for bulbs carry a second XML document as escaped
//! text inside the SOAP element, e.g. `<DeviceStatusList>&lt;?xml ...`.

use std::fmt;
use std::str::FromStr;

use quick_xml::escape::escape;

use crate::decode;
use crate::model::{BulbStatusEnvelope, BulbStatusList, EndDevices, EndDevicesEnvelope};
use crate::operation::{Validate, ValidationError, WemoOperation};
use crate::{ApiError, Service};

/// Capability code for on/off
pub const CAPABILITY_ON_OFF: &str = "10006";

/// Capability code for the dim level
pub const CAPABILITY_DIM: &str = "10008";

/// Highest dim level a bulb accepts
pub const MAX_DIM_LEVEL: i32 = 255;

// =============================================================================
// GET END DEVICES OPERATION
// =============================================================================

/// GetEndDevices operation
pub struct GetEndDevicesOperation;

/// Request for GetEndDevices operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetEndDevicesRequest {
    /// UDN of the bridge, as found in its `setup.xml`
    pub udn: String,
}

impl Validate for GetEndDevicesRequest {}

impl WemoOperation for GetEndDevicesOperation {
    type Request = GetEndDevicesRequest;
    type Response = EndDevices;

    const SERVICE: Service = Service::Bridge;
    const ACTION: &'static str = "GetEndDevices";

    fn build_payload(request: &Self::Request) -> Result<String, ValidationError> {
        Ok(format!(
            "<DevUDN>{}</DevUDN><ReqListType>PAIRED_LIST</ReqListType>",
            request.udn
        ))
    }

    fn parse_response(body: &str) -> Result<Self::Response, ApiError> {
        decode::parse_nested::<EndDevicesEnvelope>(body).map(EndDevices::from)
    }
}

// =============================================================================
// SET DEVICE STATUS OPERATION
// =============================================================================

/// A command for a bulb or bulb group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulbCommand {
    On,
    Off,
    /// Set the dim level; the value must be an integer in `0..=255`
    Dim,
}

impl BulbCommand {
    /// Capability code the command writes to
    pub fn capability(self) -> &'static str {
        match self {
            BulbCommand::On | BulbCommand::Off => CAPABILITY_ON_OFF,
            BulbCommand::Dim => CAPABILITY_DIM,
        }
    }
}

impl FromStr for BulbCommand {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(BulbCommand::On),
            "off" => Ok(BulbCommand::Off),
            "dim" => Ok(BulbCommand::Dim),
            other => Err(ValidationError::invalid_value(
                "command",
                other,
                "expected one of on, off, dim",
            )),
        }
    }
}

impl fmt::Display for BulbCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BulbCommand::On => "on",
            BulbCommand::Off => "off",
            BulbCommand::Dim => "dim",
        };
        f.write_str(name)
    }
}

/// SetDeviceStatus operation
pub struct SetDeviceStatusOperation;

/// Request for SetDeviceStatus operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDeviceStatusRequest {
    /// End-device id, or group id when `group` is set
    pub device_id: String,
    pub command: BulbCommand,
    /// Dim level for [`BulbCommand::Dim`]; ignored by on/off
    pub value: String,
    pub group: bool,
}

impl SetDeviceStatusRequest {
    /// Capability value sent to the device
    pub fn capability_value(&self) -> &str {
        match self.command {
            BulbCommand::On => "1",
            BulbCommand::Off => "0",
            BulbCommand::Dim => &self.value,
        }
    }
}

impl Validate for SetDeviceStatusRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.device_id.is_empty() {
            return Err(ValidationError::missing("device_id"));
        }

        if self.command == BulbCommand::Dim {
            let level: i32 = self
                .value
                .parse()
                .map_err(|e| ValidationError::invalid_value("value", &self.value, e))?;
            if !(0..=MAX_DIM_LEVEL).contains(&level) {
                return Err(ValidationError::range_error("value", 0, MAX_DIM_LEVEL, level));
            }
        }

        Ok(())
    }
}

impl WemoOperation for SetDeviceStatusOperation {
    type Request = SetDeviceStatusRequest;
    type Response = ();

    const SERVICE: Service = Service::Bridge;
    const ACTION: &'static str = "SetDeviceStatus";

    fn build_payload(request: &Self::Request) -> Result<String, ValidationError> {
        request.validate()?;

        let status = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><DeviceStatus><IsGroupAction>{}</IsGroupAction><DeviceID available="YES">{}</DeviceID><CapabilityID>{}</CapabilityID><CapabilityValue>{}</CapabilityValue></DeviceStatus>"#,
            if request.group { "YES" } else { "NO" },
            request.device_id,
            request.command.capability(),
            request.capability_value()
        );

        Ok(format!("<DeviceStatusList>{}</DeviceStatusList>", escape(&status)))
    }

    fn parse_response(_body: &str) -> Result<Self::Response, ApiError> {
        Ok(())
    }
}

// =============================================================================
// GET DEVICE STATUS OPERATION
// =============================================================================

/// GetDeviceStatus operation
pub struct GetDeviceStatusOperation;

/// Request for GetDeviceStatus operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetDeviceStatusRequest {
    pub device_ids: Vec<String>,
}

impl Validate for GetDeviceStatusRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.device_ids.is_empty() || self.device_ids.iter().any(|id| id.is_empty()) {
            return Err(ValidationError::missing("device_ids"));
        }
        Ok(())
    }
}

impl WemoOperation for GetDeviceStatusOperation {
    type Request = GetDeviceStatusRequest;
    type Response = BulbStatusList;

    const SERVICE: Service = Service::Bridge;
    const ACTION: &'static str = "GetDeviceStatus";

    fn build_payload(request: &Self::Request) -> Result<String, ValidationError> {
        request.validate()?;
        Ok(format!(
            "<DeviceIDs>{}</DeviceIDs>",
            request.device_ids.join(",")
        ))
    }

    fn parse_response(body: &str) -> Result<Self::Response, ApiError> {
        decode::parse_nested::<BulbStatusEnvelope>(body).map(BulbStatusList::from)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::encode;
    use rstest::rstest;

    fn set_request(id: &str, command: BulbCommand, value: &str, group: bool) -> SetDeviceStatusRequest {
        SetDeviceStatusRequest {
            device_id: id.to_string(),
            command,
            value: value.to_string(),
            group,
        }
    }

    fn soap(action: &str, element: &str, inner: &str) -> String {
        format!(
            r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body><u:{action}Response xmlns:u="urn:Belkin:service:bridge:1"><{element}>{inner}</{element}></u:{action}Response></s:Body></s:Envelope>"#,
            action = action,
            element = element,
            inner = escape(inner)
        )
    }

    const END_DEVICES: &str = r#"<?xml version="1.0" encoding="utf-8"?><DeviceLists><DeviceList><DeviceListType>Paired</DeviceListType><DeviceInfos><DeviceInfo><DeviceIndex>0</DeviceIndex><DeviceID>94103EA2B27751AF</DeviceID><FriendlyName>Hall Bulb</FriendlyName><IconVersion>1</IconVersion><FirmwareVersion>83</FirmwareVersion><CapabilityIDs>10006,10008,30008,30009,3000A</CapabilityIDs><CurrentState>1,255:0,,,</CurrentState><Manufacturer>MRVL</Manufacturer><ModelCode>MZ100</ModelCode><productName>Lighting</productName><WeMoCertified>YES</WeMoCertified></DeviceInfo><DeviceInfo><DeviceIndex>1</DeviceIndex><DeviceID>94103EA2B2782FE1</DeviceID><FriendlyName>Porch Bulb</FriendlyName><FirmwareVersion>83</FirmwareVersion><CapabilityIDs>10006,10008</CapabilityIDs><CurrentState>0,128:0</CurrentState><Manufacturer>MRVL</Manufacturer><ModelCode>MZ100</ModelCode><productName>Lighting</productName><WeMoCertified>YES</WeMoCertified></DeviceInfo></DeviceInfos></DeviceList></DeviceLists>"#;

    #[test]
    fn test_get_end_devices_payload() {
        let payload = GetEndDevicesOperation::build_payload(&GetEndDevicesRequest {
            udn: "uuid:Bridge-1_0-231442B0100001".to_string(),
        })
        .unwrap();
        assert_eq!(
            payload,
            "<DevUDN>uuid:Bridge-1_0-231442B0100001</DevUDN><ReqListType>PAIRED_LIST</ReqListType>"
        );
    }

    #[test]
    fn test_get_end_devices_response() {
        let body = soap("GetEndDevices", "DeviceLists", END_DEVICES);
        let devices = GetEndDevicesOperation::parse_response(&body).unwrap();

        assert_eq!(devices.device_list_type, "Paired");
        assert_eq!(devices.len(), 2);

        let hall = &devices.end_device_info[0];
        assert_eq!(hall.device_index, "0");
        assert_eq!(hall.device_id, "94103EA2B27751AF");
        assert_eq!(hall.friendly_name, "Hall Bulb");
        assert_eq!(hall.firmware_version, "83");
        assert_eq!(hall.capability_ids, "10006,10008,30008,30009,3000A");
        assert_eq!(hall.current_state, "1,255:0,,,");
        assert_eq!(hall.manufacturer, "MRVL");
        assert_eq!(hall.model_code, "MZ100");
        assert_eq!(hall.product_name, "Lighting");
        assert_eq!(hall.wemo_certified, "YES");

        assert_eq!(devices.end_device_info[1].friendly_name, "Porch Bulb");
    }

    #[test]
    fn test_get_end_devices_without_nested_document_is_empty() {
        // Escaped twice: a single unescape leaves the payload as text
        let body = soap("GetEndDevices", "DeviceLists", &escape(END_DEVICES));
        let devices = GetEndDevicesOperation::parse_response(&body).unwrap();

        assert!(devices.is_empty());
        assert_eq!(devices.device_list_type, "");
    }

    #[rstest]
    #[case(BulbCommand::On, "ignored", "10006", "1")]
    #[case(BulbCommand::Off, "ignored", "10006", "0")]
    #[case(BulbCommand::Dim, "128", "10008", "128")]
    #[case(BulbCommand::Dim, "0", "10008", "0")]
    #[case(BulbCommand::Dim, "255", "10008", "255")]
    fn test_set_device_status_payload(
        #[case] command: BulbCommand,
        #[case] value: &str,
        #[case] capability: &str,
        #[case] expected_value: &str,
    ) {
        let payload =
            SetDeviceStatusOperation::build_payload(&set_request("94103EA2B27751AF", command, value, false))
                .unwrap();

        assert!(payload.starts_with("<DeviceStatusList>&lt;?xml version=&quot;1.0&quot; encoding=&quot;UTF-8&quot;?&gt;"));
        assert!(payload.contains("&lt;IsGroupAction&gt;NO&lt;/IsGroupAction&gt;"));
        assert!(payload.contains("&lt;DeviceID available=&quot;YES&quot;&gt;94103EA2B27751AF&lt;/DeviceID&gt;"));
        assert!(payload.contains(&format!("&lt;CapabilityID&gt;{}&lt;/CapabilityID&gt;", capability)));
        assert!(payload.contains(&format!("&lt;CapabilityValue&gt;{}&lt;/CapabilityValue&gt;", expected_value)));
        assert!(payload.ends_with("</DeviceStatusList>"));
    }

    #[test]
    fn test_set_device_status_group_flag() {
        let payload =
            SetDeviceStatusOperation::build_payload(&set_request("GROUP1", BulbCommand::On, "", true)).unwrap();
        assert!(payload.contains("&lt;IsGroupAction&gt;YES&lt;/IsGroupAction&gt;"));
    }

    #[test]
    fn test_set_device_status_empty_id() {
        let result = SetDeviceStatusOperation::build_payload(&set_request("", BulbCommand::On, "1", false));
        assert_eq!(result, Err(ValidationError::missing("device_id")));
    }

    #[rstest]
    #[case("256")]
    #[case("-1")]
    #[case("1000")]
    fn test_set_device_status_dim_out_of_range(#[case] value: &str) {
        let result = SetDeviceStatusOperation::build_payload(&set_request("ID", BulbCommand::Dim, value, false));
        assert!(matches!(result, Err(ValidationError::RangeError { .. })));
    }

    #[rstest]
    #[case("")]
    #[case("bright")]
    #[case("12.5")]
    #[case("99999999999")]
    fn test_set_device_status_dim_not_numeric(#[case] value: &str) {
        let result = SetDeviceStatusOperation::build_payload(&set_request("ID", BulbCommand::Dim, value, false));
        assert!(matches!(result, Err(ValidationError::InvalidValue { .. })));
    }

    #[rstest]
    #[case("on", BulbCommand::On)]
    #[case("off", BulbCommand::Off)]
    #[case("dim", BulbCommand::Dim)]
    fn test_bulb_command_from_str(#[case] input: &str, #[case] expected: BulbCommand) {
        assert_eq!(input.parse::<BulbCommand>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn test_bulb_command_rejects_unknown() {
        assert!(matches!(
            "blink".parse::<BulbCommand>(),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_get_device_status_payload() {
        let encoded = encode::<GetDeviceStatusOperation>(&GetDeviceStatusRequest {
            device_ids: vec!["A1".to_string(), "B2".to_string()],
        })
        .unwrap();

        assert_eq!(encoded.action, "GetDeviceStatus");
        assert!(encoded.body.contains("<DeviceIDs>A1,B2</DeviceIDs>"));
    }

    #[test]
    fn test_get_device_status_requires_ids() {
        let result = GetDeviceStatusOperation::build_payload(&GetDeviceStatusRequest { device_ids: vec![] });
        assert_eq!(result, Err(ValidationError::missing("device_ids")));
    }

    #[test]
    fn test_get_device_status_response() {
        let inner = r#"<?xml version="1.0" encoding="utf-8"?><DeviceStatusList><DeviceStatus><IsGroupAction>NO</IsGroupAction><DeviceID available="YES">A1</DeviceID><CapabilityID>10006,10008</CapabilityID><CapabilityValue>1,255:0</CapabilityValue></DeviceStatus><DeviceStatus><IsGroupAction>NO</IsGroupAction><DeviceID available="YES">B2</DeviceID><CapabilityID>10006,10008</CapabilityID><CapabilityValue>0,40:0</CapabilityValue></DeviceStatus></DeviceStatusList>"#;
        let body = soap("GetDeviceStatus", "DeviceStatusList", inner);

        let list = GetDeviceStatusOperation::parse_response(&body).unwrap();
        assert_eq!(list.device_status.len(), 2);
        assert_eq!(list.device_status[0].device_id, "A1");
        assert_eq!(list.device_status[0].capability_value, "1,255:0");
        assert_eq!(list.device_status[1].device_id, "B2");
    }

    #[test]
    fn test_service_constant() {
        assert_eq!(GetEndDevicesOperation::SERVICE, Service::Bridge);
        assert_eq!(SetDeviceStatusOperation::SERVICE, Service::Bridge);
        assert_eq!(GetDeviceStatusOperation::SERVICE, Service::Bridge);
    }
}

// =============================================================================
// PROPERTY-BASED TESTS
// =============================================================================
