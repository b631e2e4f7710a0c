use thiserror::Error;

use crate::transport::errors::TransportError;

/// Outcome taxonomy for one episode. None of these are retried internally;
/// retry and reconnect policy belongs to the orchestrator.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The server signaled the end of the episode. Expected and terminal:
    /// the client instance must be discarded. `actual_coverage` is kept
    /// exactly as received — absent is not the same as zero.
    #[error("episode ended, actual coverage: {actual_coverage:?}")]
    EpisodeEnded { actual_coverage: Option<u32> },

    /// The server refused the most recently sent state id. The connection is
    /// still alive, but the caller's model and the server have diverged.
    #[error("server rejected state id {state_id} at step #{at_step}")]
    RejectedAction { state_id: u64, at_step: u32 },

    /// An inbound message whose tag is not valid for the current phase.
    /// Protocol desynchronization, unrecoverable for this episode.
    #[error("unexpected message type: {tag}")]
    UnexpectedMessage { tag: String },

    /// An operation was invoked out of turn by the caller.
    #[error("wrong operations order at step #{at_step}: called {called}, expected {expected}")]
    WrongOperationOrder {
        called: &'static str,
        expected: &'static str,
        at_step: u32,
    },

    #[error("malformed message: {0}")]
    Codec(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
