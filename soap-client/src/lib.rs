//! Private SOAP client for WeMo device communication
//!
//! This crate provides a minimal blocking SOAP client for the UPnP-style
//! control interface embedded in WeMo switches, Insight plugs and bridges.
//! It knows how to address a control endpoint and wrap a payload in a SOAP
//! envelope; interpreting the reply is left to the caller.

mod error;

pub use error::SoapError;

use std::time::Duration;
use tracing::debug;

/// Namespace prefix shared by every Belkin service URN
const SERVICE_URN_PREFIX: &str = "urn:Belkin:service:";

/// Timeouts applied to every request made by a [`SoapClient`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoapClientConfig {
    /// Maximum time allowed to establish the TCP connection
    pub connect_timeout: Duration,
    /// Maximum time allowed between reads of the response
    pub read_timeout: Duration,
}

impl Default for SoapClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(10),
        }
    }
}

/// Raw reply from a device: the HTTP status and a not-yet-read body
#[derive(Debug)]
pub struct SoapResponse {
    status: u16,
    inner: ureq::Response,
}

impl SoapResponse {
    /// HTTP status code of the reply
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the device answered `200 OK`
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Read the full body as text
    pub fn into_string(self) -> Result<String, SoapError> {
        self.inner
            .into_string()
            .map_err(|e| SoapError::Read(e.to_string()))
    }
}

/// Build the service URN for a WeMo service type (e.g. `basicevent`)
pub fn service_urn(service: &str) -> String {
    format!("{}{}:1", SERVICE_URN_PREFIX, service)
}

/// Build the control URL for a service on a device
pub fn control_url(host: &str, service: &str) -> String {
    format!("http://{}/upnp/control/{}1", host, service)
}

/// Wrap an action payload in the SOAP envelope the device firmware expects
pub fn envelope(service: &str, action: &str, payload: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/" s:encodingStyle="http://schemas.xmlsoap.org/soap/encoding/">
  <s:Body>
    <u:{action} xmlns:u="{service_uri}">{payload}</u:{action}>
  </s:Body>
</s:Envelope>"#,
        action = action,
        service_uri = service_urn(service),
        payload = payload
    )
}

/// A minimal SOAP client for WeMo device communication
#[derive(Debug, Clone)]
pub struct SoapClient {
    agent: ureq::Agent,
}

impl SoapClient {
    /// Create a new SOAP client with default configuration
    pub fn new() -> Self {
        Self::with_config(SoapClientConfig::default())
    }

    /// Create a SOAP client with custom timeouts
    pub fn with_config(config: SoapClientConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(config.connect_timeout)
                .timeout_read(config.read_timeout)
                .build(),
        }
    }

    /// Post a SOAP request body to a service's control endpoint
    ///
    /// # Arguments
    /// * `host` - Device address, `host[:port]`
    /// * `service` - Service type such as `basicevent`, `insight` or `bridge`
    /// * `action` - SOAP action name, e.g. `GetBinaryState`
    /// * `body` - Complete XML envelope
    ///
    /// # Returns
    /// The device reply whatever its status, or `SoapError::Network` when no
    /// reply was received.
    pub fn post(
        &self,
        host: &str,
        service: &str,
        action: &str,
        body: &str,
    ) -> Result<SoapResponse, SoapError> {
        let url = control_url(host, service);
        let soap_action = format!("\"{}#{}\"", service_urn(service), action);

        debug!(%url, %action, "posting SOAP request");

        let result = self
            .agent
            .post(&url)
            .set("Content-Type", "text/xml; charset=\"utf-8\"")
            .set("SOAPACTION", &soap_action)
            .send_string(body);

        Self::into_response(result)
    }

    /// Fetch a document with a plain GET, bounded by `timeout`
    pub fn get(&self, url: &str, timeout: Duration) -> Result<SoapResponse, SoapError> {
        debug!(%url, ?timeout, "fetching document");

        let result = self.agent.get(url).timeout(timeout).call();

        Self::into_response(result)
    }

    fn into_response(
        result: Result<ureq::Response, ureq::Error>,
    ) -> Result<SoapResponse, SoapError> {
        match result {
            Ok(response) => Ok(SoapResponse {
                status: response.status(),
                inner: response,
            }),
            // ureq reports 4xx/5xx as errors; the caller decides what they mean
            Err(ureq::Error::Status(status, response)) => Ok(SoapResponse {
                status,
                inner: response,
            }),
            Err(ureq::Error::Transport(transport)) => {
                Err(SoapError::Network(transport.to_string()))
            }
        }
    }
}

impl Default for SoapClient {
    fn default() -> Self {
        Self::new()
    }
}
