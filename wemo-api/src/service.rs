/// The UPnP services exposed by WeMo devices
///
/// Each service lives at its own control endpoint on the device and answers
/// a fixed set of SOAP actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// basicevent service - power state of switches and plugs
    BasicEvent,

    /// insight service - power usage telemetry of Insight plugs
    Insight,

    /// bridge service - end-devices (bulbs) paired with a Link bridge
    Bridge,
}

impl Service {
    /// Service type as it appears in the control path (`/upnp/control/{name}1`)
    ///
    /// The URN in the SOAPACTION header and the envelope is derived from this
    /// by [`soap_client::service_urn`].
    pub fn name(&self) -> &'static str {
        match self {
            Service::BasicEvent => "basicevent",
            Service::Insight => "insight",
            Service::Bridge => "bridge",
        }
    }
}
