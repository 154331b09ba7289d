//! Inbound broadcast events and their payloads
//!
//! A broadcast payload is an untyped bag of extras. Values are modelled as a
//! tagged union so that decoding matches on the variant rather than probing
//! the runtime type of an opaque object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single payload value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadValue {
    Text(String),
    Bytes(Vec<u8>),
    Int(i64),
    /// The key is present but carries no value
    Null,
}

impl PayloadValue {
    /// Short variant name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            PayloadValue::Text(_) => "text",
            PayloadValue::Bytes(_) => "bytes",
            PayloadValue::Int(_) => "int",
            PayloadValue::Null => "null",
        }
    }
}

impl From<&str> for PayloadValue {
    fn from(value: &str) -> Self {
        PayloadValue::Text(value.to_string())
    }
}

impl From<String> for PayloadValue {
    fn from(value: String) -> Self {
        PayloadValue::Text(value)
    }
}

impl From<Vec<u8>> for PayloadValue {
    fn from(value: Vec<u8>) -> Self {
        PayloadValue::Bytes(value)
    }
}

impl From<&[u8]> for PayloadValue {
    fn from(value: &[u8]) -> Self {
        PayloadValue::Bytes(value.to_vec())
    }
}

impl From<i64> for PayloadValue {
    fn from(value: i64) -> Self {
        PayloadValue::Int(value)
    }
}

impl From<i32> for PayloadValue {
    fn from(value: i32) -> Self {
        PayloadValue::Int(i64::from(value))
    }
}

/// Key-value extras carried by a broadcast
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload {
    values: BTreeMap<String, PayloadValue>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value under the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PayloadValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, PayloadValue::Text(value.into()));
        self
    }

    pub fn with_bytes(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.insert(key, PayloadValue::Bytes(value.into()));
        self
    }

    pub fn with_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.insert(key, PayloadValue::Int(value));
        self
    }

    pub fn with_null(mut self, key: impl Into<String>) -> Self {
        self.insert(key, PayloadValue::Null);
        self
    }

    pub fn get(&self, key: &str) -> Option<&PayloadValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The integer stored under `key`, if the key holds an integer
    pub fn int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(PayloadValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PayloadValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Payload
where
    K: Into<String>,
    V: Into<PayloadValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut payload = Payload::new();
        for (key, value) in iter {
            payload.insert(key, value);
        }
        payload
    }
}

/// One received broadcast: its identifier and its extras
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    /// Broadcast action or short vendor name
    pub identifier: String,
    #[serde(default)]
    pub payload: Payload,
}

impl InboundEvent {
    pub fn new(identifier: impl Into<String>, payload: Payload) -> Self {
        Self {
            identifier: identifier.into(),
            payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let payload = Payload::new()
            .with_text("data", "ABC")
            .with_bytes("raw", b"XYZ".to_vec())
            .with_int("length", 3)
            .with_null("gone");

        assert_eq!(payload.len(), 4);
        assert_eq!(payload.get("data"), Some(&PayloadValue::Text("ABC".into())));
        assert_eq!(payload.get("raw").map(PayloadValue::kind), Some("bytes"));
        assert_eq!(payload.int("length"), Some(3));
        assert_eq!(payload.int("data"), None);
        assert!(payload.contains_key("gone"));
        assert_eq!(payload.get("missing"), None);
    }

    #[test]
    fn test_insert_replaces() {
        let mut payload = Payload::new().with_int("length", 3);
        payload.insert("length", 7);
        assert_eq!(payload.int("length"), Some(7));
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn test_iter_is_sorted_by_key() {
        let payload = Payload::new()
            .with_int("length", 3)
            .with_text("data", "ABC")
            .with_null("barocode");

        let keys: Vec<&str> = payload.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["barocode", "data", "length"]);
        assert_eq!(payload.iter().nth(2), Some(("length", &PayloadValue::Int(3))));
    }

    #[test]
    fn test_event_from_json() {
        let json = r#"{
            "identifier": "scan.rcv.message",
            "payload": {
                "barocode": { "bytes": [65, 66, 67] },
                "length": { "int": 2 },
                "note": "null"
            }
        }"#;

        let event: InboundEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.identifier, "scan.rcv.message");
        assert_eq!(
            event.payload.get("barocode"),
            Some(&PayloadValue::Bytes(vec![65, 66, 67]))
        );
        assert_eq!(event.payload.int("length"), Some(2));
        assert_eq!(event.payload.get("note"), Some(&PayloadValue::Null));
    }

    #[test]
    fn test_event_without_payload_from_json() {
        let event: InboundEvent = serde_json::from_str(r#"{"identifier":"NL"}"#).unwrap();
        assert!(event.payload.is_empty());
    }
}
