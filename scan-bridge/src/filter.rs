//! Broadcast action filter handed to the platform when registering the
//! scan receiver.

use scan_dispatch::ScanAction;

/// The set of broadcast actions the receiver listens for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastFilter {
    actions: Vec<String>,
    /// Delivery priority requested from the platform
    pub priority: i32,
}

impl Default for BroadcastFilter {
    fn default() -> Self {
        Self::vendor_defaults()
    }
}

impl BroadcastFilter {
    /// An empty filter with default priority
    pub fn empty() -> Self {
        Self {
            actions: Vec::new(),
            priority: 0,
        }
    }

    /// All vendor actions at the highest priority so scanner broadcasts
    /// reach this receiver first
    pub fn vendor_defaults() -> Self {
        ScanAction::ALL
            .into_iter()
            .fold(Self::empty(), |filter, action| filter.with_action(action.action()))
            .with_priority(i32::MAX)
    }

    /// Add an action; duplicates are ignored
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        let action = action.into();
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn matches(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
