//! XEP-0092: Software Version
//!
//! Answers `jabber:iq:version` queries with the application name and the
//! version resolved from `version.sh`.
//!
//! ## References
//!
//! - <https://xmpp.org/extensions/xep-0092.html>

use std::str::FromStr;

use siproxylin_core::VersionInfo;
use tracing::debug;
use xmpp_parsers::minidom::Element;

use crate::error::SoftwareVersionError;

/// XEP-0092 Software Version namespace.
pub const NS_VERSION: &str = "jabber:iq:version";

const NS_CLIENT: &str = "jabber:client";

/// Payload of a `<query xmlns='jabber:iq:version'>` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftwareVersion {
    pub name: String,
    pub version: String,
    /// Operating system; omitted unless explicitly set.
    pub os: Option<String>,
}

impl SoftwareVersion {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            os: None,
        }
    }

    pub fn with_os(mut self, os: impl Into<String>) -> Self {
        self.os = Some(os.into());
        self
    }

    pub fn from_info(info: &VersionInfo) -> Self {
        Self::new(info.app_name, info.version.clone())
    }

    /// Build the `<query xmlns='jabber:iq:version'>` element.
    pub fn build_element(&self) -> Element {
        let mut builder = Element::builder("query", NS_VERSION)
            .append(
                Element::builder("name", NS_VERSION)
                    .append(self.name.clone())
                    .build(),
            )
            .append(
                Element::builder("version", NS_VERSION)
                    .append(self.version.clone())
                    .build(),
            );

        if let Some(os) = &self.os {
            builder = builder.append(Element::builder("os", NS_VERSION).append(os.clone()).build());
        }

        builder.build()
    }

    /// Parse a query element. Returns `None` for a foreign element or when
    /// `name` or `version` is missing.
    pub fn from_element(elem: &Element) -> Option<Self> {
        if !elem.is("query", NS_VERSION) {
            return None;
        }

        let name = elem.get_child("name", NS_VERSION)?.text();
        let version = elem.get_child("version", NS_VERSION)?.text();
        let os = elem
            .get_child("os", NS_VERSION)
            .map(|e| e.text())
            .filter(|s| !s.is_empty());

        Some(Self { name, version, os })
    }
}

/// Whether `element` is an `<iq type='get'>` carrying a version query.
pub fn is_version_query(element: &Element) -> bool {
    element.name() == "iq"
        && element.attr("type") == Some("get")
        && element.children().any(|c| c.is("query", NS_VERSION))
}

/// Build the serialized `<iq type='result'>` answering a raw version request.
pub fn build_version_response(
    request: &[u8],
    version: &SoftwareVersion,
) -> Result<Vec<u8>, SoftwareVersionError> {
    let xml = std::str::from_utf8(request).map_err(|error| {
        SoftwareVersionError::ParseFailed(format!("invalid UTF-8 stanza bytes: {error}"))
    })?;
    let element = Element::from_str(xml.trim()).map_err(|error| {
        SoftwareVersionError::ParseFailed(format!("failed to parse stanza XML: {error}"))
    })?;

    if !is_version_query(&element) {
        return Err(SoftwareVersionError::NotAVersionQuery(
            element.name().to_string(),
        ));
    }

    let mut builder = Element::builder("iq", NS_CLIENT).attr("type", "result");
    if let Some(id) = element.attr("id") {
        builder = builder.attr("id", id);
    }
    if let Some(from) = element.attr("from") {
        builder = builder.attr("to", from);
    }
    let response = builder.append(version.build_element()).build();

    debug!(
        id = element.attr("id").unwrap_or_default(),
        to = element.attr("from").unwrap_or_default(),
        "answering software version query"
    );

    let mut payload = Vec::new();
    response.write_to(&mut payload).map_err(|error| {
        SoftwareVersionError::SerializeFailed(format!("failed to serialize <iq/> result: {error}"))
    })?;
    Ok(payload)
}

/// Service discovery features backed by this crate.
pub fn disco_features() -> &'static [&'static str] {
    &[NS_VERSION]
}
