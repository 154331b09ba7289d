//! Error types for the scan-bridge crate.

/// Errors from the receiver lifecycle
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The bridge is not attached to a host engine
    #[error("Bridge is not attached to an engine")]
    EngineDetached,

    /// No activity is attached to register the receiver with
    #[error("No activity attached, cannot manage receiver")]
    NoActivity,

    /// Unregister was requested for a receiver that is not registered
    #[error("Receiver not registered or already unregistered")]
    ReceiverNotRegistered,

    /// The platform registrar rejected the request
    #[error("Registrar error: {0}")]
    Registrar(String),

    /// Invalid bridge configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid dispatcher configuration
    #[error("Dispatcher configuration error: {0}")]
    Dispatch(#[from] scan_dispatch::ConfigError),
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BridgeError>;
