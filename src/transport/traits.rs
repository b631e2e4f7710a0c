use async_trait::async_trait;

use crate::transport::errors::TransportError;

/// A reliable, ordered, message-oriented connection to the game server.
///
/// Each `send` transmits exactly one frame and each `recv` consumes exactly
/// one frame — message boundaries are the transport's problem, not the
/// caller's. `recv` resolves only when a frame arrives or the connection
/// reports closure; callers needing a bounded wait wrap the future in
/// `tokio::time::timeout`.
#[async_trait]
pub trait MessageTransport: Send {
    async fn send(&mut self, frame: String) -> Result<(), TransportError>;
    async fn recv(&mut self) -> Result<String, TransportError>;
}
