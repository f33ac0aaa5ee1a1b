//! XMPP Extension Protocols advertised by the client.
//!
//! The table is static capability data shown in the About dialog and
//! reported through [`crate::version::VersionInfo`]. Update it whenever
//! support for a new XEP lands.

use serde::Serialize;

/// A supported XEP: zero-padded number and human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SupportedXep {
    /// Four-digit zero-padded XEP number (e.g., "0030")
    pub number: &'static str,
    /// Human-readable XEP name
    pub name: &'static str,
}

impl SupportedXep {
    const fn new(number: &'static str, name: &'static str) -> Self {
        Self { number, name }
    }

    /// Display label, e.g. `XEP-0030: Service Discovery`.
    pub fn label(&self) -> String {
        format!("XEP-{}: {}", self.number, self.name)
    }

    /// Link to the XEP document on xmpp.org.
    pub fn url(&self) -> String {
        format!("https://xmpp.org/extensions/xep-{}.html", self.number)
    }
}

impl std::fmt::Display for SupportedXep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "XEP-{}: {}", self.number, self.name)
    }
}

/// XEPs supported by this client, in ascending number order.
pub static SUPPORTED_XEPS: &[SupportedXep] = &[
    SupportedXep::new("0030", "Service Discovery"),
    SupportedXep::new("0045", "Multi-User Chat"),
    SupportedXep::new("0054", "vcard-temp"),
    SupportedXep::new("0077", "In-Band Registration"),
    SupportedXep::new("0084", "User Avatar (PEP)"),
    SupportedXep::new("0085", "Chat State Notifications"),
    SupportedXep::new("0092", "Software Version"),
    SupportedXep::new("0115", "Entity Capabilities"),
    SupportedXep::new("0153", "vCard-Based Avatars"),
    SupportedXep::new("0158", "CAPTCHA Forms"),
    SupportedXep::new("0184", "Message Delivery Receipts"),
    SupportedXep::new("0191", "Blocking Command"),
    SupportedXep::new("0198", "Stream Management"),
    SupportedXep::new("0199", "XMPP Ping"),
    SupportedXep::new("0215", "External Service Discovery"),
    SupportedXep::new("0221", "Media Element"),
    SupportedXep::new("0231", "Bits of Binary"),
    SupportedXep::new("0280", "Message Carbons"),
    SupportedXep::new("0308", "Last Message Correction"),
    SupportedXep::new("0313", "Message Archive Management"),
    SupportedXep::new("0333", "Chat Markers"),
    SupportedXep::new("0353", "Jingle Message Initiation"),
    SupportedXep::new("0359", "Unique and Stable Stanza IDs"),
    SupportedXep::new("0363", "HTTP File Upload"),
    SupportedXep::new("0384", "OMEMO Encryption (0.3.0 & 0.8.0+)"),
    SupportedXep::new("0402", "PEP Native Bookmarks"),
    SupportedXep::new("0421", "Occupant ID (MUC)"),
    SupportedXep::new("0444", "Message Reactions"),
    SupportedXep::new("0461", "Message Replies"),
];

/// Look up a supported XEP by number. Accepts padded ("0030") or
/// unpadded ("30") forms.
pub fn find_xep(number: &str) -> Option<&'static SupportedXep> {
    let number = number.trim();
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let padded = format!("{number:0>4}");
    SUPPORTED_XEPS.iter().find(|xep| xep.number == padded)
}

/// Whether the client advertises support for the given XEP number.
pub fn is_supported(number: &str) -> bool {
    find_xep(number).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_is_non_empty() {
        assert!(!SUPPORTED_XEPS.is_empty());
    }

    #[test]
    fn numbers_are_zero_padded_digits() {
        for xep in SUPPORTED_XEPS {
            assert_eq!(xep.number.len(), 4, "bad number: {}", xep.number);
            assert!(xep.number.chars().all(|c| c.is_ascii_digit()));
            assert!(!xep.name.is_empty());
        }
    }

    #[test]
    fn table_has_no_duplicates() {
        let numbers: HashSet<_> = SUPPORTED_XEPS.iter().map(|x| x.number).collect();
        assert_eq!(numbers.len(), SUPPORTED_XEPS.len());
    }

    #[test]
    fn table_is_sorted_by_number() {
        let numbers: Vec<_> = SUPPORTED_XEPS.iter().map(|x| x.number).collect();
        let mut sorted = numbers.clone();
        sorted.sort();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn table_is_stable_across_reads() {
        let first: Vec<_> = SUPPORTED_XEPS.to_vec();
        let second: Vec<_> = SUPPORTED_XEPS.to_vec();
        assert_eq!(first, second);
        assert_eq!(first.first().map(|x| x.number), Some("0030"));
        assert_eq!(first.last().map(|x| x.number), Some("0461"));
    }

    #[test]
    fn finds_padded_and_unpadded_numbers() {
        assert_eq!(find_xep("0030").map(|x| x.name), Some("Service Discovery"));
        assert_eq!(find_xep("30").map(|x| x.name), Some("Service Discovery"));
        assert_eq!(find_xep(" 384 ").map(|x| x.number), Some("0384"));
    }

    #[test]
    fn rejects_unknown_or_malformed_numbers() {
        assert!(find_xep("0001").is_none());
        assert!(find_xep("").is_none());
        assert!(find_xep("xep-0030").is_none());
        assert!(!is_supported("-30"));
    }

    #[test]
    fn label_and_url() {
        let xep = find_xep("92").unwrap();
        assert_eq!(xep.label(), "XEP-0092: Software Version");
        assert_eq!(xep.to_string(), xep.label());
        assert_eq!(xep.url(), "https://xmpp.org/extensions/xep-0092.html");
    }
}
