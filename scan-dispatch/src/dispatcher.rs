//! Broadcast dispatcher - converts an InboundEvent into a ScanResult
//!
//! The dispatcher looks up the extraction rule for the broadcast identifier,
//! reads the rule's payload key and decodes the value according to the rule
//! policy. It is total: malformed payloads degrade to `Absent` and are only
//! reported through `tracing`.

use std::sync::OnceLock;

use crate::config::{DispatchConfig, Utf8Mode, ZeroLengthPolicy};
use crate::error::{ConfigError, LengthFallback, Miss};
use crate::payload::{InboundEvent, Payload, PayloadValue};
use crate::result::ScanResult;
use crate::rule::{DecodePolicy, ExtractionRule, RuleTable};

/// A scan result together with the reason it came out the way it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub result: ScanResult,
    /// Why the result is absent, if it is
    pub miss: Option<Miss>,
    /// Set when a companion length extra was ignored
    pub length_fallback: Option<LengthFallback>,
}

/// Resolves inbound broadcasts against a rule table
///
/// Immutable after construction, so a single instance can be shared freely
/// between threads.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: RuleTable,
    config: DispatchConfig,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Dispatcher over the vendor rule table with the default configuration
    pub fn new() -> Self {
        Self {
            table: RuleTable::vendor_defaults(),
            config: DispatchConfig::default(),
        }
    }

    /// Dispatcher over the vendor rule table with a custom configuration
    pub fn with_config(config: DispatchConfig) -> Result<Self, ConfigError> {
        Self::from_parts(RuleTable::vendor_defaults(), config)
    }

    /// Dispatcher over a custom rule table with the default configuration
    pub fn with_table(table: RuleTable) -> Self {
        Self {
            table,
            config: DispatchConfig::default(),
        }
    }

    pub fn from_parts(table: RuleTable, config: DispatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { table, config })
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Resolve one broadcast into a scan result
    pub fn resolve(&self, event: &InboundEvent) -> ScanResult {
        self.explain(event).result
    }

    /// Resolve one broadcast and report which branch decided the outcome
    pub fn explain(&self, event: &InboundEvent) -> Resolution {
        tracing::debug!("Received scanner broadcast: {}", event.identifier);

        let mut length_fallback = None;
        match self.extract(event, &mut length_fallback) {
            Ok(text) => {
                tracing::debug!("Resolved scan from {}: {}", event.identifier, text);
                Resolution {
                    result: ScanResult::Present(text),
                    miss: None,
                    length_fallback,
                }
            }
            Err(miss) => {
                match &miss {
                    Miss::UnrecognizedIdentifier { .. } => tracing::info!("{}", miss),
                    Miss::DecodeFailure { .. } => {
                        tracing::error!("{} (broadcast {})", miss, event.identifier)
                    }
                    _ => tracing::warn!("{} (broadcast {})", miss, event.identifier),
                }
                Resolution {
                    result: ScanResult::Absent,
                    miss: Some(miss),
                    length_fallback,
                }
            }
        }
    }

    fn extract(
        &self,
        event: &InboundEvent,
        length_fallback: &mut Option<LengthFallback>,
    ) -> Result<String, Miss> {
        let ExtractionRule { key, policy } = *self.table.get(&event.identifier).ok_or_else(|| {
            Miss::UnrecognizedIdentifier {
                identifier: event.identifier.clone(),
            }
        })?;

        let value = match event.payload.get(key) {
            None | Some(PayloadValue::Null) => {
                return Err(Miss::MissingKey {
                    key: key.to_string(),
                })
            }
            Some(value) => value,
        };

        match (policy, value) {
            (DecodePolicy::DirectText | DecodePolicy::TextOrBytes, PayloadValue::Text(text)) => {
                Ok(trim_scan(text))
            }
            (DecodePolicy::Utf8FullLength, PayloadValue::Bytes(bytes)) => {
                self.decode(key, bytes).map(|text| trim_scan(&text))
            }
            (
                DecodePolicy::Utf8WithLengthKey | DecodePolicy::TextOrBytes,
                PayloadValue::Bytes(bytes),
            ) => self.decode_with_length_key(key, bytes, &event.payload, length_fallback),
            (DecodePolicy::FixedLengthExtras { length_key }, PayloadValue::Bytes(bytes)) => {
                let length = event.payload.int(length_key).unwrap_or(0);
                if length <= 0 {
                    return Err(Miss::NonPositiveLength {
                        key: length_key.to_string(),
                        length,
                    });
                }
                let end = usize::try_from(length).map_or(bytes.len(), |n| n.min(bytes.len()));
                self.decode(key, &bytes[..end])
            }
            (policy, other) => Err(Miss::type_mismatch(key, other, policy)),
        }
    }

    /// Decode the significant prefix of `bytes`, as named by a companion
    /// length extra, falling back to the whole sequence on a bad length
    fn decode_with_length_key(
        &self,
        key: &str,
        bytes: &[u8],
        payload: &Payload,
        length_fallback: &mut Option<LengthFallback>,
    ) -> Result<String, Miss> {
        tracing::debug!("Payload key '{}' holds bytes, decoding as UTF-8", key);

        let available = bytes.len();
        if available == 0 {
            return Ok(String::new());
        }

        // The first length key present wins; a non-integer value there means
        // full length, not a fall through to the next key
        let per_key = self.config.length_key_for(key);
        let requested = if payload.contains_key(&per_key) {
            payload.int(&per_key)
        } else if payload.contains_key(&self.config.generic_length_key) {
            payload.int(&self.config.generic_length_key)
        } else {
            None
        };

        let length = match requested {
            None => available,
            Some(n) => match usize::try_from(n) {
                Ok(0) => match self.config.zero_length {
                    ZeroLengthPolicy::Trust => 0,
                    ZeroLengthPolicy::UseFullLength => {
                        tracing::warn!(
                            "Length for byte payload key '{}' was 0 but {} bytes are present, using full length",
                            key,
                            available
                        );
                        *length_fallback = Some(LengthFallback::ZeroWithData { available });
                        available
                    }
                },
                Ok(len) if len <= available => len,
                _ => {
                    tracing::warn!(
                        "Invalid length ({}) for byte payload key '{}', using full length ({})",
                        n,
                        key,
                        available
                    );
                    *length_fallback = Some(LengthFallback::OutOfRange {
                        requested: n,
                        available,
                    });
                    available
                }
            },
        };

        self.decode(key, &bytes[..length])
            .map(|text| trim_scan(&text))
    }

    fn decode(&self, key: &str, bytes: &[u8]) -> Result<String, Miss> {
        match self.config.utf8 {
            Utf8Mode::Strict => std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|e| Miss::DecodeFailure {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            Utf8Mode::Lossy => Ok(String::from_utf8_lossy(bytes).into_owned()),
        }
    }
}

/// Strip every char up to and including U+0020 from both ends, which covers
/// spaces, CR/LF and NUL padding but keeps non-ASCII whitespace
fn trim_scan(text: &str) -> String {
    text.trim_matches(|c: char| c <= '\u{20}').to_string()
}

/// Resolve a broadcast with the vendor rule table and default configuration
pub fn resolve(event: &InboundEvent) -> ScanResult {
    static DEFAULT: OnceLock<Dispatcher> = OnceLock::new();
    DEFAULT.get_or_init(Dispatcher::new).resolve(event)
}
