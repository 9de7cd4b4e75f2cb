//! The API client

use crate::{
    Error,
    model::{Device, HostEntry, Scan, ScanConfig, ScanSummary, Site},
    request, response,
    xml::Element,
};
use anyhow::Context;
use nexpose_common::sender::{HttpSender, Options};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::instrument;
use url::Url;

/// Version of the XML API, part of the endpoint path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApiVersion {
    #[default]
    V1_1,
    V1_2,
}

impl ApiVersion {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
        }
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown API version: {0} (expected 1.1 or 1.2)")]
pub struct UnknownApiVersion(pub String);

impl FromStr for ApiVersion {
    type Err = UnknownApiVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1.1" => Ok(Self::V1_1),
            "1.2" => Ok(Self::V1_2),
            other => Err(UnknownApiVersion(other.to_string())),
        }
    }
}

/// A client for the XML API of a Nexpose console.
///
/// Each operation is one request/response round trip. Operations other than [`Self::login`]
/// require a session and fail with [`Error::NotLoggedIn`] without contacting the server when
/// there is none.
#[derive(Debug)]
pub struct NexposeClient {
    sender: HttpSender,
    endpoint: Url,
    session_id: Option<String>,
}

impl NexposeClient {
    /// Create a client for the console at `https://{host}:{port}/api/{version}/xml`.
    pub fn new(
        host: &str,
        port: u16,
        version: ApiVersion,
        options: Options,
    ) -> anyhow::Result<Self> {
        // IPv6 literals need brackets in a URL
        let authority = match host.contains(':') && !host.starts_with('[') {
            true => format!("[{host}]:{port}"),
            false => format!("{host}:{port}"),
        };

        let endpoint = Url::parse(&format!("https://{authority}/api/{version}/xml"))
            .with_context(|| format!("Building endpoint URL for host: {host}"))?;

        Self::with_endpoint(endpoint, options)
    }

    /// Create a client for an explicit endpoint URL.
    pub fn with_endpoint(endpoint: Url, options: Options) -> anyhow::Result<Self> {
        Ok(Self::with_sender(endpoint, HttpSender::new(options)?))
    }

    pub fn with_sender(endpoint: Url, sender: HttpSender) -> Self {
        Self {
            sender,
            endpoint,
            session_id: None,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session_id.is_some()
    }

    fn session(&self) -> Result<&str, Error> {
        self.session_id.as_deref().ok_or(Error::NotLoggedIn)
    }

    /// Post a document, returning the response body without evaluating it.
    pub async fn send_raw(&self, document: impl Into<String>) -> Result<String, Error> {
        Ok(self.sender.post_xml(&self.endpoint, document.into()).await?)
    }

    /// Send a request, returning the root of a successful response.
    // Workaround until https://github.com/tokio-rs/tracing/issues/2876 is fixed
    #[allow(clippy::blocks_in_conditions)]
    #[instrument(level = "debug", skip_all, fields(request = %request.name), err)]
    pub async fn send_request(&self, request: &Element) -> Result<Element, Error> {
        let body = self.send_raw(request.to_xml()?).await?;
        let root = response::evaluate(&body)?;
        log::debug!("{} -> {}", request.name, root.name);
        Ok(root)
    }

    /// Log in, storing and returning the session ID.
    pub async fn login(&mut self, user_id: &str, password: &str) -> Result<&str, Error> {
        let root = self
            .send_request(&request::login(user_id, password))
            .await?;

        let session_id = root
            .attribute("session-id")
            .filter(|session_id| !session_id.is_empty())
            .ok_or(Error::MissingAttribute {
                element: "LoginResponse",
                attribute: "session-id",
            })?;

        log::info!("Logged in as '{user_id}'");

        Ok(self.session_id.insert(session_id.to_string()).as_str())
    }

    /// Log out.
    ///
    /// The local session is cleared before contacting the server, so it is gone even if the
    /// server reports an error. Without a session, this does nothing.
    pub async fn logout(&mut self) -> Result<(), Error> {
        let Some(session_id) = self.session_id.take() else {
            log::debug!("Not logged in, skipping logout");
            return Ok(());
        };

        self.send_request(&request::logout(&session_id)).await?;
        log::info!("Logged out");

        Ok(())
    }

    /// All sites, in the order the server lists them.
    pub async fn list_sites(&self) -> Result<Vec<Site>, Error> {
        let root = self
            .send_request(&request::site_listing(self.session()?))
            .await?;

        root.find_all(Site::ELEMENT).map(Site::try_from).collect()
    }

    /// The scan targets configured for a site.
    pub async fn list_site_hosts(&self, site_id: &str) -> Result<Vec<HostEntry>, Error> {
        let root = self
            .send_request(&request::site_config(self.session()?, site_id))
            .await?;

        let hosts = site(&root)?
            .child("Hosts")
            .ok_or(Error::MissingElement("Hosts"))?;

        Ok(hosts
            .children
            .iter()
            .filter_map(|element| {
                let entry = HostEntry::from_element(element);
                if entry.is_none() {
                    log::debug!("Skipping host element: {}", element.name);
                }
                entry
            })
            .collect())
    }

    pub async fn get_site_scan_config(&self, site_id: &str) -> Result<ScanConfig, Error> {
        let root = self
            .send_request(&request::site_config(self.session()?, site_id))
            .await?;

        site(&root)?
            .child("ScanConfig")
            .map(ScanConfig::from)
            .ok_or(Error::MissingElement("ScanConfig"))
    }

    /// Statistics of a scan, as reported by the server.
    pub async fn get_scan_summary(
        &self,
        scan_id: &str,
        engine_id: &str,
    ) -> Result<ScanSummary, Error> {
        let root = self
            .send_request(&request::scan_statistics(
                self.session()?,
                scan_id,
                engine_id,
            ))
            .await?;

        root.find("ScanSummary")
            .map(ScanSummary::from)
            .ok_or(Error::MissingElement("ScanSummary"))
    }

    /// Start scanning all targets of a site.
    pub async fn start_site_scan(&self, site_id: &str) -> Result<Scan, Error> {
        let root = self
            .send_request(&request::site_scan(self.session()?, site_id))
            .await?;

        scan(&root)
    }

    /// Start scanning selected targets of a site.
    pub async fn start_scan_on_hosts(
        &self,
        site_id: &str,
        hosts: &[HostEntry],
    ) -> Result<Scan, Error> {
        let session = self.session()?;

        if hosts.is_empty() {
            return Err(Error::NoHosts);
        }

        let root = self
            .send_request(&request::site_devices_scan(session, site_id, hosts))
            .await?;

        scan(&root)
    }

    /// Assets discovered in a site.
    pub async fn list_site_devices(&self, site_id: &str) -> Result<Vec<Device>, Error> {
        let root = self
            .send_request(&request::site_device_listing(self.session()?, site_id))
            .await?;

        root.find_all(Device::ELEMENT)
            .map(Device::try_from)
            .collect()
    }
}

fn site(root: &Element) -> Result<&Element, Error> {
    root.child("Site").ok_or(Error::MissingElement("Site"))
}

fn scan(root: &Element) -> Result<Scan, Error> {
    root.find(Scan::ELEMENT)
        .ok_or(Error::MissingElement(Scan::ELEMENT))
        .and_then(Scan::try_from)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn endpoint_from_host() {
        let client =
            NexposeClient::new("console.local", 3780, ApiVersion::V1_2, Options::new()).unwrap();

        assert_eq!(
            client.endpoint().as_str(),
            "https://console.local:3780/api/1.2/xml"
        );
        assert!(!client.is_logged_in());
    }

    #[test]
    fn ipv6_host() {
        let client =
            NexposeClient::new("fd00::1", 3780, ApiVersion::V1_1, Options::new()).unwrap();

        assert_eq!(
            client.endpoint().as_str(),
            "https://[fd00::1]:3780/api/1.1/xml"
        );
    }

    #[test]
    fn invalid_host() {
        let result = NexposeClient::new("not a host", 3780, ApiVersion::V1_1, Options::new());
        assert!(result.is_err());
    }

    #[test]
    fn parse_version() {
        assert_eq!("1.1".parse(), Ok(ApiVersion::V1_1));
        assert_eq!("1.2".parse(), Ok(ApiVersion::V1_2));
        assert_eq!(
            "2.0".parse::<ApiVersion>(),
            Err(UnknownApiVersion("2.0".into()))
        );
    }
}
