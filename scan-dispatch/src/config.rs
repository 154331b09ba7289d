//! Configuration for the dispatcher
//!
//! Controls the byte decoding heuristics: where companion length extras are
//! looked up, whether a zero length is trusted, and how invalid UTF-8 is
//! treated.

use crate::error::ConfigError;

/// What to do with a companion length of 0 when bytes are present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroLengthPolicy {
    /// Treat the zero as a bad signal and decode the whole sequence
    #[default]
    UseFullLength,
    /// Believe the device and decode nothing
    Trust,
}

/// How byte sequences that are not valid UTF-8 are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Mode {
    /// Invalid input is a miss
    #[default]
    Strict,
    /// Invalid sequences become U+FFFD
    Lossy,
}

/// Configuration for a [`Dispatcher`](crate::Dispatcher)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Appended to a rule key to form the per-key length extra
    /// Default: "_length"
    pub length_key_suffix: String,

    /// Length extra consulted when the per-key one is absent
    /// Default: "length"
    pub generic_length_key: String,

    /// Handling of a zero companion length
    /// Default: UseFullLength
    pub zero_length: ZeroLengthPolicy,

    /// Handling of invalid UTF-8
    /// Default: Strict
    pub utf8: Utf8Mode,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            length_key_suffix: "_length".to_string(),
            generic_length_key: "length".to_string(),
            zero_length: ZeroLengthPolicy::UseFullLength,
            utf8: Utf8Mode::Strict,
        }
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust every companion length the device sends, including zero
    pub fn strict_lengths() -> Self {
        Self {
            zero_length: ZeroLengthPolicy::Trust,
            ..Default::default()
        }
    }

    /// Decode invalid UTF-8 with replacement characters instead of missing
    pub fn lossy() -> Self {
        Self {
            utf8: Utf8Mode::Lossy,
            ..Default::default()
        }
    }

    pub fn with_length_key_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.length_key_suffix = suffix.into();
        self
    }

    pub fn with_generic_length_key(mut self, key: impl Into<String>) -> Self {
        self.generic_length_key = key.into();
        self
    }

    pub fn with_zero_length(mut self, policy: ZeroLengthPolicy) -> Self {
        self.zero_length = policy;
        self
    }

    pub fn with_utf8(mut self, mode: Utf8Mode) -> Self {
        self.utf8 = mode;
        self
    }

    /// Name of the per-key length extra for `key`
    pub fn length_key_for(&self, key: &str) -> String {
        format!("{}{}", key, self.length_key_suffix)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.length_key_suffix.is_empty() {
            return Err(ConfigError::EmptyLengthKeySuffix);
        }

        if self.generic_length_key.is_empty() {
            return Err(ConfigError::EmptyGenericLengthKey);
        }

        Ok(())
    }
}
