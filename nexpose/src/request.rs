//! Request documents of the API

use crate::{model::HostEntry, xml::Element};

pub fn login(user_id: &str, password: &str) -> Element {
    Element::new("LoginRequest")
        .with_attribute("user-id", user_id)
        .with_attribute("password", password)
}

pub fn logout(session_id: &str) -> Element {
    Element::new("LogoutRequest").with_attribute("session-id", session_id)
}

pub fn site_listing(session_id: &str) -> Element {
    Element::new("SiteListingRequest").with_attribute("session-id", session_id)
}

/// Shared by the requests which only target a site.
fn site_request(name: &str, session_id: &str, site_id: &str) -> Element {
    Element::new(name)
        .with_attribute("session-id", session_id)
        .with_attribute("site-id", site_id)
}

pub fn site_config(session_id: &str, site_id: &str) -> Element {
    site_request("SiteConfigRequest", session_id, site_id)
}

pub fn site_scan(session_id: &str, site_id: &str) -> Element {
    site_request("SiteScanRequest", session_id, site_id)
}

pub fn site_device_listing(session_id: &str, site_id: &str) -> Element {
    site_request("SiteDeviceListingRequest", session_id, site_id)
}

/// Scan a subset of a site's targets.
///
/// No devices are selected by ID, all targets are passed as `range` and `host` elements.
pub fn site_devices_scan(session_id: &str, site_id: &str, hosts: &[HostEntry]) -> Element {
    site_request("SiteDevicesScanRequest", session_id, site_id)
        .with_child(Element::new("Devices"))
        .with_child(Element::new("Hosts").with_children(hosts.iter().map(HostEntry::to_element)))
}

pub fn scan_statistics(session_id: &str, scan_id: &str, engine_id: &str) -> Element {
    Element::new("ScanStatisticsRequest")
        .with_attribute("session-id", session_id)
        .with_attribute("engine-id", engine_id)
        .with_attribute("scan-id", scan_id)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn login_document() {
        assert_eq!(
            login("admin", "admin").to_xml().unwrap(),
            r#"<LoginRequest user-id="admin" password="admin"/>"#
        );
    }

    #[test]
    fn scan_statistics_document() {
        assert_eq!(
            scan_statistics("abc123", "4", "3").to_xml().unwrap(),
            r#"<ScanStatisticsRequest session-id="abc123" engine-id="3" scan-id="4"/>"#
        );
    }

    #[test]
    fn hosts_document() {
        let request = site_devices_scan(
            "abc123",
            "2",
            &[
                HostEntry::range("10.0.0.1-10.0.0.5").unwrap(),
                HostEntry::host("a.example.com"),
            ],
        );

        assert_eq!(
            request.to_xml().unwrap(),
            concat!(
                r#"<SiteDevicesScanRequest session-id="abc123" site-id="2">"#,
                "<Devices/>",
                "<Hosts>",
                r#"<range from="10.0.0.1" to="10.0.0.5"/>"#,
                "<host>a.example.com</host>",
                "</Hosts>",
                "</SiteDevicesScanRequest>"
            )
        );

        // the document can be read back into the same entries
        let parsed = Element::parse(&request.to_xml().unwrap()).unwrap();
        let hosts = parsed.child("Hosts").unwrap();

        let ranges: Vec<_> = hosts.find_all("range").collect();
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].attribute("from"), Some("10.0.0.1"));
        assert_eq!(ranges[0].attribute("to"), Some("10.0.0.5"));

        let names: Vec<_> = hosts.find_all("host").map(|host| host.text.as_str()).collect();
        assert_eq!(names, ["a.example.com"]);
    }
}
