//! Subscriber side of the bridge
//!
//! A [`ScanSink`] receives every present scan result. [`ChannelSink`]
//! forwards results into a tokio channel for async consumers.

use tokio::sync::mpsc;

/// Receives decoded scan text
pub trait ScanSink: Send + Sync {
    fn success(&self, text: String);
}

impl<F> ScanSink for F
where
    F: Fn(String) + Send + Sync,
{
    fn success(&self, text: String) {
        self(text)
    }
}

/// A scan result as delivered over a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    /// Name of the channel the result was published on
    pub channel: String,
    /// The decoded barcode text
    pub text: String,
}

/// Sink that publishes scan results to an unbounded channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    channel: String,
    sender: mpsc::UnboundedSender<ScanEvent>,
}

impl ChannelSink {
    /// Create a sink publishing on `channel`
    ///
    /// # Example
    ///
    /// ```
    /// use tokio::sync::mpsc;
    /// use scan_bridge::{ChannelSink, ScanEvent};
    ///
    /// let (tx, mut rx) = mpsc::unbounded_channel::<ScanEvent>();
    /// let sink = ChannelSink::new("com.shinow.pda_scanner/plugin", tx);
    /// ```
    pub fn new(channel: impl Into<String>, sender: mpsc::UnboundedSender<ScanEvent>) -> Self {
        Self {
            channel: channel.into(),
            sender,
        }
    }

    /// Create a sink together with the receiving end of its channel
    pub fn channel(channel: impl Into<String>) -> (Self, mpsc::UnboundedReceiver<ScanEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(channel, tx), rx)
    }

    pub fn channel_name(&self) -> &str {
        &self.channel
    }
}

impl ScanSink for ChannelSink {
    fn success(&self, text: String) {
        let event = ScanEvent {
            channel: self.channel.clone(),
            text,
        };

        // Ignore errors if the receiver is dropped
        if self.sender.send(event).is_err() {
            tracing::debug!("Scan receiver dropped on channel {}", self.channel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_channel_sink_sends_events() {
        let (sink, mut rx) = ChannelSink::channel("test/channel");

        sink.success("ABC".to_string());
        sink.success("DEF".to_string());

        let first = rx.recv().await.unwrap();
        assert_eq!(first.channel, "test/channel");
        assert_eq!(first.text, "ABC");
        assert_eq!(rx.recv().await.unwrap().text, "DEF");
    }

    #[test]
    fn test_channel_sink_tolerates_dropped_receiver() {
        let (sink, rx) = ChannelSink::channel("test/channel");
        drop(rx);
        sink.success("ignored".to_string());
    }

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            move |text: String| seen.lock().unwrap().push(text)
        };

        sink.success("X".to_string());
        assert_eq!(*seen.lock().unwrap(), vec!["X".to_string()]);
    }
}
