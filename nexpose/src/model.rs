//! Records projected from API responses

use crate::{Error, xml::Element};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::fmt::{Display, Formatter};

fn required(
    element: &Element,
    name: &'static str,
    attribute: &'static str,
) -> Result<String, Error> {
    element
        .attribute(attribute)
        .map(ToOwned::to_owned)
        .ok_or(Error::MissingAttribute {
            element: name,
            attribute,
        })
}

fn optional(element: &Element, attribute: &str) -> Option<String> {
    element.attribute(attribute).map(ToOwned::to_owned)
}

/// A site, from a `SiteSummary` element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Site {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_factor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<String>,
}

impl Site {
    pub const ELEMENT: &'static str = "SiteSummary";
}

impl TryFrom<&Element> for Site {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self, Self::Error> {
        Ok(Self {
            id: required(element, Self::ELEMENT, "id")?,
            name: required(element, Self::ELEMENT, "name")?,
            description: optional(element, "description"),
            risk_factor: optional(element, "riskfactor"),
            risk_score: optional(element, "riskscore"),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid address range '{0}', expected 'from-to' or a single address")]
pub struct InvalidRange(pub String);

/// A scan target of a site: an address range, a single address, or a hostname.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEntry {
    /// A single address (no `to`) or an inclusive range of addresses.
    Range { from: String, to: Option<String> },
    Host(String),
}

impl HostEntry {
    /// Create a range from its `from-to` or `from` form.
    ///
    /// Neither bound may be empty.
    pub fn range(range: &str) -> Result<Self, InvalidRange> {
        let (from, to) = match range.split_once('-') {
            Some((from, to)) => (from.trim(), Some(to.trim())),
            None => (range.trim(), None),
        };

        if from.is_empty() || to.is_some_and(str::is_empty) {
            return Err(InvalidRange(range.to_string()));
        }

        Ok(Self::Range {
            from: from.to_string(),
            to: to.map(ToString::to_string),
        })
    }

    pub fn host(name: impl Into<String>) -> Self {
        Self::Host(name.into())
    }

    /// Read an entry from a `range` or `host` element.
    ///
    /// Returns `None` for any other element, a range without `from`, or a host without a name.
    pub fn from_element(element: &Element) -> Option<Self> {
        match element.name.as_str() {
            "range" => Some(Self::Range {
                from: element.attribute("from")?.to_string(),
                to: optional(element, "to"),
            }),
            "host" => {
                let name = element.text.trim();
                (!name.is_empty()).then(|| Self::Host(name.to_string()))
            }
            _ => None,
        }
    }

    pub fn to_element(&self) -> Element {
        match self {
            Self::Range { from, to } => {
                let element = Element::new("range").with_attribute("from", from);
                match to {
                    Some(to) => element.with_attribute("to", to),
                    None => element,
                }
            }
            Self::Host(name) => Element::new("host").with_text(name),
        }
    }
}

impl Display for HostEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Range { from, to: None } => f.write_str(from),
            Self::Range {
                from,
                to: Some(to),
            } => write!(f, "{from}-{to}"),
            Self::Host(name) => f.write_str(name),
        }
    }
}

/// Serializes as `{"range": "from-to"}` or `{"host": "name"}`.
impl Serialize for HostEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = match self {
            Self::Range { .. } => "range",
            Self::Host(_) => "host",
        };

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(key, &self.to_string())?;
        map.end()
    }
}

/// Scan configuration of a site, from a `ScanConfig` element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScanConfig {
    pub template_id: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub engine_id: Option<String>,
    pub config_version: Option<String>,
}

impl From<&Element> for ScanConfig {
    fn from(element: &Element) -> Self {
        Self {
            template_id: optional(element, "templateID"),
            name: optional(element, "name"),
            id: optional(element, "configID"),
            engine_id: optional(element, "engineID"),
            config_version: optional(element, "configVersion"),
        }
    }
}

/// A started scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scan {
    pub scan_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_id: Option<String>,
}

impl Scan {
    pub const ELEMENT: &'static str = "Scan";
}

impl TryFrom<&Element> for Scan {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self, Self::Error> {
        Ok(Self {
            scan_id: required(element, Self::ELEMENT, "scan-id")?,
            engine_id: optional(element, "engine-id"),
        })
    }
}

/// All attributes of a `ScanSummary` element, in the order the server sent them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary(Vec<(String, String)>);

impl ScanSummary {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn status(&self) -> Option<&str> {
        self.get("status")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&Element> for ScanSummary {
    fn from(element: &Element) -> Self {
        Self(element.attributes.clone())
    }
}

impl IntoIterator for ScanSummary {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Serialize for ScanSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// An asset discovered in a site, from a `device` element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Device {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_factor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<String>,
}

impl Device {
    pub const ELEMENT: &'static str = "device";
}

impl TryFrom<&Element> for Device {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self, Self::Error> {
        Ok(Self {
            id: required(element, Self::ELEMENT, "id")?,
            address: optional(element, "address"),
            risk_factor: optional(element, "riskfactor"),
            risk_score: optional(element, "riskscore"),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn site_from_summary() {
        let element = Element::new("SiteSummary")
            .with_attribute("id", "2")
            .with_attribute("name", "Lab")
            .with_attribute("riskfactor", "1.0")
            .with_attribute("riskscore", "3425.5");

        let site = Site::try_from(&element).unwrap();

        assert_eq!(
            site,
            Site {
                id: "2".into(),
                name: "Lab".into(),
                description: None,
                risk_factor: Some("1.0".into()),
                risk_score: Some("3425.5".into()),
            }
        );
    }

    #[test]
    fn site_requires_id() {
        let element = Element::new("SiteSummary").with_attribute("name", "Lab");

        assert!(matches!(
            Site::try_from(&element),
            Err(Error::MissingAttribute {
                element: "SiteSummary",
                attribute: "id"
            })
        ));
    }

    #[test]
    fn host_entry_display() {
        let range = HostEntry::from_element(
            &Element::new("range")
                .with_attribute("from", "10.0.0.1")
                .with_attribute("to", "10.0.0.10"),
        )
        .unwrap();
        assert_eq!(range.to_string(), "10.0.0.1-10.0.0.10");

        let single =
            HostEntry::from_element(&Element::new("range").with_attribute("from", "10.0.0.1"))
                .unwrap();
        assert_eq!(single.to_string(), "10.0.0.1");

        let host =
            HostEntry::from_element(&Element::new("host").with_text("example.com")).unwrap();
        assert_eq!(host.to_string(), "example.com");
    }

    #[test]
    fn host_entry_skips_unknown() {
        assert_eq!(HostEntry::from_element(&Element::new("device")), None);
        assert_eq!(HostEntry::from_element(&Element::new("range")), None);
        assert_eq!(
            HostEntry::from_element(&Element::new("host").with_text("  ")),
            None
        );
    }

    #[test]
    fn host_entry_range_form() {
        assert_eq!(
            HostEntry::range("10.0.0.1-10.0.0.5"),
            Ok(HostEntry::Range {
                from: "10.0.0.1".into(),
                to: Some("10.0.0.5".into())
            })
        );
        assert_eq!(
            HostEntry::range(" 10.0.0.1 "),
            Ok(HostEntry::Range {
                from: "10.0.0.1".into(),
                to: None
            })
        );
    }

    #[test]
    fn host_entry_rejects_empty_bounds() {
        for range in ["", "  ", "10.0.0.1-", "-10.0.0.5", "-", "10.0.0.1 - "] {
            assert_eq!(
                HostEntry::range(range),
                Err(InvalidRange(range.to_string())),
                "range: {range:?}"
            );
        }
    }

    #[test]
    fn host_entry_serializes_tagged() {
        let entries = [
            HostEntry::range("10.0.0.1-10.0.0.5").unwrap(),
            HostEntry::host("a.example.com"),
        ];

        assert_eq!(
            serde_json::to_string(&entries).unwrap(),
            r#"[{"range":"10.0.0.1-10.0.0.5"},{"host":"a.example.com"}]"#
        );
    }

    #[test]
    fn scan_summary_keeps_order() {
        let element = Element::new("ScanSummary")
            .with_attribute("scan-id", "4")
            .with_attribute("status", "running")
            .with_attribute("engine-id", "3");

        let summary = ScanSummary::from(&element);

        assert_eq!(summary.status(), Some("running"));
        assert_eq!(
            serde_json::to_string(&summary).unwrap(),
            r#"{"scan-id":"4","status":"running","engine-id":"3"}"#
        );
    }
}
