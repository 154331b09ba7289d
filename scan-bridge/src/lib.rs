//! # scan-bridge
//!
//! Host-side glue around [`scan_dispatch`]: registers the scanner broadcast
//! receiver with the platform, follows the host's attach/detach lifecycle and
//! forwards present scan results to the single current subscriber.
//!
//! # Architecture
//!
//! ```text
//! Platform broadcast → ScanBridge::on_receive → Dispatcher → ScanSink
//!                       (lifecycle, filter)                  (subscriber)
//! ```
//!
//! The platform side is abstracted by [`BroadcastRegistrar`]; subscribers
//! implement [`ScanSink`] or use [`ChannelSink`] to receive results over a
//! tokio channel.
//!
//! # Example
//!
//! ```rust
//! use scan_bridge::{BroadcastFilter, BroadcastRegistrar, ChannelSink, Delivery, ScanBridge};
//! use scan_dispatch::{InboundEvent, Payload};
//!
//! struct NoopRegistrar;
//!
//! impl BroadcastRegistrar for NoopRegistrar {
//!     fn register(&mut self, _: &str, _: &BroadcastFilter) -> scan_bridge::Result<()> { Ok(()) }
//!     fn unregister(&mut self, _: &str) -> scan_bridge::Result<()> { Ok(()) }
//! }
//!
//! let mut bridge = ScanBridge::new(NoopRegistrar);
//! bridge.attach_to_engine();
//! bridge.attach_to_activity("MainActivity")?;
//!
//! let (sink, mut scans) = ChannelSink::channel("com.shinow.pda_scanner/plugin");
//! bridge.on_listen(sink);
//!
//! let event = InboundEvent::new("NL", Payload::new().with_text("SCAN_BARCODE1", "A-1"));
//! assert_eq!(bridge.on_receive(&event), Delivery::Delivered("A-1".to_string()));
//! assert_eq!(scans.try_recv().unwrap().text, "A-1");
//! # Ok::<(), scan_bridge::BridgeError>(())
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod filter;
pub mod sink;

pub use bridge::{BroadcastRegistrar, Delivery, ScanBridge};
pub use config::{BridgeConfig, DEFAULT_CHANNEL_NAME};
pub use error::{BridgeError, Result};
pub use filter::BroadcastFilter;
pub use sink::{ChannelSink, ScanEvent, ScanSink};
