//! End-to-end bridge tests
//!
//! Drives a bridge through a typical host session: engine attach, activity
//! attach, subscription, a burst of vendor broadcasts, teardown.

use std::sync::{Arc, Mutex};

use rstest::rstest;
use scan_bridge::{
    BridgeConfig, BridgeError, BroadcastFilter, BroadcastRegistrar, ChannelSink, Delivery,
    ScanBridge, ScanEvent, DEFAULT_CHANNEL_NAME,
};
use scan_dispatch::{DispatchConfig, InboundEvent, Payload, ScanAction};

/// Registrar that mirrors a platform receiver registry
#[derive(Clone, Default)]
struct SharedRegistrar {
    registered: Arc<Mutex<Option<(String, BroadcastFilter)>>>,
}

impl BroadcastRegistrar for SharedRegistrar {
    fn register(&mut self, activity: &str, filter: &BroadcastFilter) -> scan_bridge::Result<()> {
        *self.registered.lock().unwrap() = Some((activity.to_string(), filter.clone()));
        Ok(())
    }

    fn unregister(&mut self, activity: &str) -> scan_bridge::Result<()> {
        let mut registered = self.registered.lock().unwrap();
        match registered.as_ref() {
            Some((current, _)) if current == activity => {
                *registered = None;
                Ok(())
            }
            _ => Err(BridgeError::Registrar(format!(
                "Receiver not registered for {}",
                activity
            ))),
        }
    }
}

fn started_bridge() -> (ScanBridge<SharedRegistrar>, SharedRegistrar) {
    let registrar = SharedRegistrar::default();
    let mut bridge = ScanBridge::new(registrar.clone());
    bridge.attach_to_engine();
    bridge.attach_to_activity("MainActivity").unwrap();
    (bridge, registrar)
}

#[tokio::test]
async fn session_delivers_present_results_in_order() {
    let (mut bridge, registrar) = started_bridge();

    let (sink, mut rx) = ChannelSink::channel(bridge.config().channel_name.clone());
    bridge.on_listen(sink);

    let events = vec![
        InboundEvent::new(
            ScanAction::Xm.action(),
            Payload::new().with_text("scannerdata", "XM-1"),
        ),
        InboundEvent::new(ScanAction::Yto.action(), Payload::new()),
        InboundEvent::new(
            ScanAction::Pl.action(),
            Payload::new()
                .with_bytes("barocode", b"PL-2\0\0".to_vec())
                .with_int("length", 4),
        ),
        InboundEvent::new("android.intent.action.BATTERY_LOW", Payload::new()),
        InboundEvent::new(
            ScanAction::Idata.action(),
            Payload::new()
                .with_bytes("value", b"IDATA-3   ".to_vec())
                .with_int("length", 0),
        ),
    ];

    let deliveries: Vec<Delivery> = events.iter().map(|e| bridge.on_receive(e)).collect();
    assert_eq!(
        deliveries,
        vec![
            Delivery::Delivered("XM-1".to_string()),
            Delivery::Dropped,
            Delivery::Delivered("PL-2".to_string()),
            Delivery::Dropped,
            Delivery::Delivered("IDATA-3".to_string()),
        ]
    );

    for expected in ["XM-1", "PL-2", "IDATA-3"] {
        let ScanEvent { channel, text } = rx.recv().await.unwrap();
        assert_eq!(channel, DEFAULT_CHANNEL_NAME);
        assert_eq!(text, expected);
    }
    assert!(rx.try_recv().is_err());

    bridge.on_cancel();
    bridge.detach_from_activity().unwrap();
    bridge.detach_from_engine();
    assert!(registrar.registered.lock().unwrap().is_none());
}

#[test]
fn registered_filter_lists_every_vendor() {
    let (_bridge, registrar) = started_bridge();

    let registered = registrar.registered.lock().unwrap();
    let (activity, filter) = registered.as_ref().unwrap();
    assert_eq!(activity, "MainActivity");
    assert_eq!(filter.priority, i32::MAX);
    for action in ScanAction::ALL {
        assert!(filter.matches(action.action()), "missing {}", action);
    }
}

#[test]
fn platform_unregister_failure_is_reported() {
    let (mut bridge, registrar) = started_bridge();

    // Platform lost the registration behind the bridge's back
    *registrar.registered.lock().unwrap() = None;

    assert!(matches!(
        bridge.detach_from_activity(),
        Err(BridgeError::Registrar(_))
    ));
    assert!(!bridge.is_receiver_registered());
    assert_eq!(bridge.activity(), None);
}

#[rstest]
#[case(BridgeConfig::new().with_channel_name(""))]
#[case(BridgeConfig::new().with_filter(BroadcastFilter::empty()))]
#[case(BridgeConfig::new().with_dispatch(DispatchConfig::new().with_generic_length_key("")))]
fn invalid_config_is_rejected(#[case] config: BridgeConfig) {
    assert!(ScanBridge::with_config(SharedRegistrar::default(), config).is_err());
}

#[test]
fn custom_config_drives_registration_and_decoding() {
    let registrar = SharedRegistrar::default();
    let config = BridgeConfig::new()
        .with_channel_name("scanner/events")
        .with_filter(BroadcastFilter::empty().with_action(ScanAction::Nl.action()).with_priority(10))
        .with_dispatch(DispatchConfig::lossy());

    let mut bridge = ScanBridge::with_config(registrar.clone(), config).unwrap();
    bridge.attach_to_engine();
    bridge.attach_to_activity("ScanActivity").unwrap();

    let registered = registrar.registered.lock().unwrap().clone().unwrap();
    assert_eq!(registered.1.actions().len(), 1);
    assert_eq!(registered.1.priority, 10);

    let (sink, mut rx) = ChannelSink::channel(bridge.config().channel_name.clone());
    bridge.on_listen(sink);

    let event = InboundEvent::new(
        "NL",
        Payload::new().with_bytes("SCAN_BARCODE1", vec![b'N', 0xFF, b'L']),
    );
    assert_eq!(
        bridge.on_receive(&event),
        Delivery::Delivered("N\u{FFFD}L".to_string())
    );
    assert_eq!(rx.try_recv().unwrap().channel, "scanner/events");
}
