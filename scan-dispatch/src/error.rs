//! Miss and error types for scan-dispatch
//!
//! Resolution itself never fails: every [`Miss`] is converted into
//! [`ScanResult::Absent`](crate::ScanResult::Absent) and only surfaces through
//! logging or [`Dispatcher::explain`](crate::Dispatcher::explain).

use crate::payload::PayloadValue;
use crate::rule::DecodePolicy;

/// Why a broadcast produced no scan result
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Miss {
    /// No rule is registered for the identifier
    #[error("Unhandled scanner broadcast: {identifier}")]
    UnrecognizedIdentifier { identifier: String },

    /// The rule key is absent or null
    #[error("Payload key '{key}' is missing or null")]
    MissingKey { key: String },

    /// The value under the rule key has the wrong variant for the policy
    #[error("Payload key '{key}' holds {found}, not usable by {policy:?}")]
    TypeMismatch {
        key: String,
        found: &'static str,
        policy: DecodePolicy,
    },

    /// The length extra required by a fixed-length rule is not positive
    #[error("Payload key '{key}' has non-positive length {length}")]
    NonPositiveLength { key: String, length: i64 },

    /// The selected bytes are not valid UTF-8
    #[error("Payload key '{key}' is not valid UTF-8: {reason}")]
    DecodeFailure { key: String, reason: String },
}

impl Miss {
    pub(crate) fn type_mismatch(key: &str, value: &PayloadValue, policy: DecodePolicy) -> Self {
        Miss::TypeMismatch {
            key: key.to_string(),
            found: value.kind(),
            policy,
        }
    }
}

/// A companion length that was discarded in favour of the full sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthFallback {
    /// Negative or larger than the sequence
    OutOfRange { requested: i64, available: usize },
    /// Zero while bytes were present
    ZeroWithData { available: usize },
}

/// Errors from building a dispatcher
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Length key suffix must not be empty")]
    EmptyLengthKeySuffix,

    #[error("Generic length key must not be empty")]
    EmptyGenericLengthKey,
}
