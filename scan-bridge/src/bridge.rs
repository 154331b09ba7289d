//! Receiver lifecycle and subscriber delivery
//!
//! `ScanBridge` is the host-owned state around the dispatcher: whether the
//! bridge is attached to the host engine and to an activity, whether the
//! platform receiver is registered, and the single current subscriber.
//! The host drives it from its event loop; nothing here is global.

use scan_dispatch::{Dispatcher, InboundEvent, ScanResult};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::filter::BroadcastFilter;
use crate::sink::ScanSink;

/// Platform hook that (un)registers the broadcast receiver for an activity
pub trait BroadcastRegistrar {
    fn register(&mut self, activity: &str, filter: &BroadcastFilter) -> Result<()>;

    fn unregister(&mut self, activity: &str) -> Result<()>;
}

/// What happened to one received broadcast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// The scan text was handed to the subscriber
    Delivered(String),
    /// The broadcast resolved to no result
    Dropped,
    /// Nobody is listening, the broadcast was discarded undecoded
    NoSubscriber,
}

/// Host-side bridge between platform broadcasts and a scan subscriber
pub struct ScanBridge<R: BroadcastRegistrar> {
    config: BridgeConfig,
    dispatcher: Dispatcher,
    registrar: R,
    engine_attached: bool,
    activity: Option<String>,
    receiver_registered: bool,
    sink: Option<Box<dyn ScanSink>>,
}

impl<R: BroadcastRegistrar> ScanBridge<R> {
    /// Create a bridge with the default configuration
    pub fn new(registrar: R) -> Self {
        Self::from_parts(registrar, BridgeConfig::default(), Dispatcher::new())
    }

    /// Create a bridge with a custom configuration
    pub fn with_config(registrar: R, config: BridgeConfig) -> Result<Self> {
        config.validate()?;
        let dispatcher = Dispatcher::with_config(config.dispatch.clone())?;
        Ok(Self::from_parts(registrar, config, dispatcher))
    }

    /// Create a bridge around an already built dispatcher
    pub fn with_dispatcher(registrar: R, config: BridgeConfig, dispatcher: Dispatcher) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(registrar, config, dispatcher))
    }

    fn from_parts(registrar: R, config: BridgeConfig, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            dispatcher,
            registrar,
            engine_attached: false,
            activity: None,
            receiver_registered: false,
            sink: None,
        }
    }

    // ------------------------------------------------------------------
    // Engine lifecycle
    // ------------------------------------------------------------------

    pub fn attach_to_engine(&mut self) {
        tracing::debug!("Attached to engine, channel {}", self.config.channel_name);
        self.engine_attached = true;
    }

    /// Detach from the host engine, dropping the subscriber
    pub fn detach_from_engine(&mut self) {
        tracing::debug!("Detached from engine");
        self.engine_attached = false;
        self.sink = None;
    }

    // ------------------------------------------------------------------
    // Activity lifecycle
    // ------------------------------------------------------------------

    /// Attach to an activity and register the receiver with it
    pub fn attach_to_activity(&mut self, activity: impl Into<String>) -> Result<()> {
        let activity = activity.into();
        tracing::debug!("Attached to activity {}", activity);
        self.activity = Some(activity);
        self.register_receiver()
    }

    /// Unregister the receiver and forget the activity
    pub fn detach_from_activity(&mut self) -> Result<()> {
        tracing::debug!("Detached from activity");
        let outcome = self.unregister_receiver();
        self.activity = None;
        outcome
    }

    pub fn detach_for_config_changes(&mut self) -> Result<()> {
        tracing::debug!("Detached from activity for config changes");
        let outcome = self.unregister_receiver();
        self.activity = None;
        outcome
    }

    pub fn reattach_for_config_changes(&mut self, activity: impl Into<String>) -> Result<()> {
        let activity = activity.into();
        tracing::debug!("Reattached to activity {} after config changes", activity);
        self.activity = Some(activity);
        self.register_receiver()
    }

    fn register_receiver(&mut self) -> Result<()> {
        let Some(activity) = self.activity.as_deref() else {
            tracing::error!("Activity is missing, cannot register receiver");
            return Err(BridgeError::NoActivity);
        };

        if !self.engine_attached {
            tracing::error!("Engine is detached, cannot register receiver");
            return Err(BridgeError::EngineDetached);
        }

        if self.receiver_registered {
            tracing::debug!("Receiver already registered for activity {}", activity);
            return Ok(());
        }

        tracing::debug!(
            "Registering scan receiver for activity {} ({} actions)",
            activity,
            self.config.filter.actions().len()
        );
        self.registrar.register(activity, &self.config.filter)?;
        self.receiver_registered = true;
        Ok(())
    }

    fn unregister_receiver(&mut self) -> Result<()> {
        let Some(activity) = self.activity.as_deref() else {
            tracing::warn!("Activity is missing, cannot unregister receiver");
            return Err(BridgeError::NoActivity);
        };

        if !self.receiver_registered {
            tracing::warn!("Receiver not registered or already unregistered");
            return Err(BridgeError::ReceiverNotRegistered);
        }

        tracing::debug!("Unregistering scan receiver for activity {}", activity);
        // The platform forgets the receiver even when it reports an error
        self.receiver_registered = false;
        if let Err(e) = self.registrar.unregister(activity) {
            tracing::warn!("Receiver unregistration failed: {}", e);
            return Err(e);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Subscription
    // ------------------------------------------------------------------

    /// Install the subscriber, replacing any previous one
    pub fn on_listen(&mut self, sink: impl ScanSink + 'static) {
        tracing::debug!("Subscriber listening on {}", self.config.channel_name);
        self.sink = Some(Box::new(sink));
    }

    pub fn on_cancel(&mut self) {
        tracing::debug!("Subscriber cancelled on {}", self.config.channel_name);
        self.sink = None;
    }

    // ------------------------------------------------------------------
    // Delivery
    // ------------------------------------------------------------------

    /// Handle one received broadcast
    pub fn on_receive(&self, event: &InboundEvent) -> Delivery {
        let Some(sink) = self.sink.as_deref() else {
            tracing::warn!("No subscriber, discarding scanned data from {}", event.identifier);
            return Delivery::NoSubscriber;
        };

        match self.dispatcher.resolve(event) {
            ScanResult::Present(text) => {
                tracing::debug!("Sending scan event: {}", text);
                sink.success(text.clone());
                Delivery::Delivered(text)
            }
            ScanResult::Absent => {
                tracing::warn!("Scan result is absent for broadcast {}", event.identifier);
                Delivery::Dropped
            }
        }
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn is_engine_attached(&self) -> bool {
        self.engine_attached
    }

    pub fn activity(&self) -> Option<&str> {
        self.activity.as_deref()
    }

    pub fn is_receiver_registered(&self) -> bool {
        self.receiver_registered
    }

    pub fn has_subscriber(&self) -> bool {
        self.sink.is_some()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }
}
