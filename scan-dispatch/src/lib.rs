//! # scan-dispatch
//!
//! Normalizes barcode scanner broadcasts from different PDA vendors into a
//! single scan result.
//!
//! Every vendor publishes a decoded barcode in its own way: as plain text
//! under a vendor-specific key, as raw bytes, or as raw bytes with a separate
//! length extra. The [`Dispatcher`] maps each broadcast identifier to an
//! [`ExtractionRule`] and applies it, producing exactly one [`ScanResult`]
//! per [`InboundEvent`].
//!
//! # Architecture
//!
//! ```text
//! Host broadcast → InboundEvent → Dispatcher (RuleTable) → ScanResult
//!                                                         (Present | Absent)
//! ```
//!
//! Resolution never fails. Unknown identifiers, missing keys, mistyped values
//! and undecodable bytes all produce [`ScanResult::Absent`]; use
//! [`Dispatcher::explain`] to find out why.
//!
//! # Quick Start
//!
//! ```rust
//! use scan_dispatch::{resolve, InboundEvent, Payload, ScanResult};
//!
//! let event = InboundEvent::new(
//!     "com.honeywell.decode.intent.action.EDIT_DATA",
//!     Payload::new().with_text("data", " 4006381333931 "),
//! );
//!
//! assert_eq!(resolve(&event), ScanResult::Present("4006381333931".to_string()));
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod payload;
pub mod result;
pub mod rule;
pub mod vendor;

pub use config::{DispatchConfig, Utf8Mode, ZeroLengthPolicy};
pub use dispatcher::{resolve, Dispatcher, Resolution};
pub use error::{ConfigError, LengthFallback, Miss};
pub use payload::{InboundEvent, Payload, PayloadValue};
pub use result::ScanResult;
pub use rule::{DecodePolicy, ExtractionRule, RuleTable};
pub use vendor::{ScanAction, UnknownScanAction};
