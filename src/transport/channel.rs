use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::transport::errors::TransportError;
use crate::transport::traits::MessageTransport;

/// In-process transport backed by a pair of channels.
///
/// Used to run a client against an in-process server end (tests, local
/// simulation harnesses). Frames arrive in send order; dropping one end makes
/// the peer's `recv` fail with `TransportError::Closed`.
#[derive(Debug)]
pub struct ChannelTransport {
    tx: mpsc::UnboundedSender<String>,
    rx: mpsc::UnboundedReceiver<String>,
}

/// Creates two connected transport ends.
pub fn pair() -> (ChannelTransport, ChannelTransport) {
    let (a_tx, a_rx) = mpsc::unbounded_channel();
    let (b_tx, b_rx) = mpsc::unbounded_channel();
    (
        ChannelTransport { tx: a_tx, rx: b_rx },
        ChannelTransport { tx: b_tx, rx: a_rx },
    )
}

#[async_trait]
impl MessageTransport for ChannelTransport {
    async fn send(&mut self, frame: String) -> Result<(), TransportError> {
        self.tx.send(frame).map_err(|_| TransportError::Closed)
    }

    async fn recv(&mut self) -> Result<String, TransportError> {
        self.rx.recv().await.ok_or(TransportError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn frames_arrive_in_send_order() {
        let (mut left, mut right) = pair();

        left.send("one".to_string()).await.unwrap();
        left.send("two".to_string()).await.unwrap();

        assert_eq!(right.recv().await.unwrap(), "one");
        assert_eq!(right.recv().await.unwrap(), "two");
    }

    #[tokio::test]
    async fn recv_fails_when_peer_is_dropped() {
        let (left, mut right) = pair();
        drop(left);

        let result = right.recv().await;
        assert!(matches!(result, Err(TransportError::Closed)));
    }

    #[tokio::test]
    async fn send_fails_when_peer_is_dropped() {
        let (mut left, right) = pair();
        drop(right);

        let result = left.send("orphan".to_string()).await;
        assert!(matches!(result, Err(TransportError::Closed)));
    }
}
