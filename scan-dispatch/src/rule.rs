//! Extraction rules
//!
//! A rule names the payload key carrying the barcode and how to interpret
//! the value found there. The [`RuleTable`] maps broadcast identifiers to
//! rules; supporting a new scanner means adding an entry, not a branch.

use std::collections::HashMap;

use crate::vendor::ScanAction;

/// How the value under a rule's key is turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePolicy {
    /// The value must be text; it is trimmed
    DirectText,
    /// The value must be bytes; all of them are decoded as UTF-8 and trimmed
    Utf8FullLength,
    /// The value must be bytes; a companion integer extra names how many
    /// leading bytes are significant
    Utf8WithLengthKey,
    /// Bytes under the rule key plus a required length under `length_key`.
    /// Not trimmed.
    FixedLengthExtras { length_key: &'static str },
    /// Text is read as [`DecodePolicy::DirectText`], bytes as
    /// [`DecodePolicy::Utf8WithLengthKey`]
    TextOrBytes,
}

/// Which payload key to read and how to decode it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionRule {
    pub key: &'static str,
    pub policy: DecodePolicy,
}

impl ExtractionRule {
    pub const fn new(key: &'static str, policy: DecodePolicy) -> Self {
        Self { key, policy }
    }

    /// The rule a default vendor is registered with
    pub const fn for_action(action: ScanAction) -> Self {
        match action {
            ScanAction::Xm | ScanAction::Shiniow | ScanAction::Seuic => {
                Self::new("scannerdata", DecodePolicy::TextOrBytes)
            }
            ScanAction::Idata => Self::new("value", DecodePolicy::TextOrBytes),
            ScanAction::Ybx => Self::new("barcode_string", DecodePolicy::TextOrBytes),
            ScanAction::Pl => Self::new(
                "barocode",
                DecodePolicy::FixedLengthExtras {
                    length_key: "length",
                },
            ),
            ScanAction::Honeywell | ScanAction::BarcodeData | ScanAction::Yto => {
                Self::new("data", DecodePolicy::TextOrBytes)
            }
            ScanAction::Nl => Self::new("SCAN_BARCODE1", DecodePolicy::TextOrBytes),
        }
    }
}

/// Identifier to rule lookup
///
/// Immutable once handed to a [`Dispatcher`](crate::Dispatcher).
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, ExtractionRule>,
}

impl RuleTable {
    /// A table with no entries
    pub fn empty() -> Self {
        Self::default()
    }

    /// The ten vendor rules, each reachable by short name and by broadcast
    /// action
    pub fn vendor_defaults() -> Self {
        ScanAction::ALL
            .into_iter()
            .fold(Self::empty(), |table, action| table.with_action(action, ExtractionRule::for_action(action)))
    }

    /// Add or replace the rule for a single identifier
    pub fn with_rule(mut self, identifier: impl Into<String>, rule: ExtractionRule) -> Self {
        self.rules.insert(identifier.into(), rule);
        self
    }

    /// Add or replace the rule for a vendor under both of its identifiers
    pub fn with_action(self, action: ScanAction, rule: ExtractionRule) -> Self {
        self.with_rule(action.name(), rule)
            .with_rule(action.action(), rule)
    }

    pub fn get(&self, identifier: &str) -> Option<&ExtractionRule> {
        self.rules.get(identifier)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_defaults_cover_every_action() {
        let table = RuleTable::vendor_defaults();
        assert_eq!(table.len(), ScanAction::ALL.len() * 2);

        for action in ScanAction::ALL {
            let by_name = table.get(action.name()).unwrap();
            let by_action = table.get(action.action()).unwrap();
            assert_eq!(by_name, by_action);
            assert_eq!(*by_name, ExtractionRule::for_action(action));
        }
    }

    #[test]
    fn test_pl_uses_length_extra() {
        let rule = ExtractionRule::for_action(ScanAction::Pl);
        assert_eq!(rule.key, "barocode");
        assert_eq!(
            rule.policy,
            DecodePolicy::FixedLengthExtras {
                length_key: "length"
            }
        );
    }

    #[test]
    fn test_with_rule_overrides() {
        let table = RuleTable::vendor_defaults()
            .with_rule("HONEYWELL", ExtractionRule::new("data", DecodePolicy::DirectText));

        assert_eq!(table.get("HONEYWELL").unwrap().policy, DecodePolicy::DirectText);
        assert_eq!(
            table.get(ScanAction::Honeywell.action()).unwrap().policy,
            DecodePolicy::TextOrBytes
        );
    }

    #[test]
    fn test_empty_table() {
        let table = RuleTable::empty();
        assert!(table.is_empty());
        assert!(table.get("XM").is_none());
    }
}
