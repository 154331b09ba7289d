//! Configuration for the scan bridge

use scan_dispatch::DispatchConfig;

use crate::error::BridgeError;
use crate::filter::BroadcastFilter;

/// Default event channel name
pub const DEFAULT_CHANNEL_NAME: &str = "com.shinow.pda_scanner/plugin";

/// Configuration for a [`ScanBridge`](crate::ScanBridge)
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Name of the channel scan results are published on
    /// Default: "com.shinow.pda_scanner/plugin"
    pub channel_name: String,

    /// Actions the receiver is registered for
    /// Default: all vendor actions at priority i32::MAX
    pub filter: BroadcastFilter,

    /// Decoding configuration for the dispatcher
    pub dispatch: DispatchConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            filter: BroadcastFilter::vendor_defaults(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl BridgeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel_name(mut self, name: impl Into<String>) -> Self {
        self.channel_name = name.into();
        self
    }

    pub fn with_filter(mut self, filter: BroadcastFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_dispatch(mut self, dispatch: DispatchConfig) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.channel_name.is_empty() {
            return Err(BridgeError::Configuration(
                "Channel name must not be empty".to_string(),
            ));
        }

        if self.filter.is_empty() {
            return Err(BridgeError::Configuration(
                "Broadcast filter must list at least one action".to_string(),
            ));
        }

        self.dispatch.validate()?;

        Ok(())
    }
}
