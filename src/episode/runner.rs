use tracing::debug;
use uuid::Uuid;

use crate::episode::client::EpisodeClient;
use crate::protocol::errors::ProtocolError;
use crate::protocol::messages::GameState;
use crate::transport::traits::MessageTransport;

/// Fitness signal for one finished episode, consumed by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    pub episode_id: Uuid,
    /// Completed action/feedback round-trips before the terminal signal.
    pub steps: u32,
    /// Coverage reported by the server's terminal message, if it carried one.
    pub actual_coverage: Option<u32>,
}

/// Plays one full episode: receive state, decide, send action, receive
/// feedback, until the server calls game over.
///
/// `decide` is the opaque decision function — it sees each state and picks
/// `(next_state_id, predicted_usefulness)`. A normal terminal signal becomes
/// the returned [`EpisodeOutcome`]; rejected actions, unexpected messages and
/// transport failures propagate as-is so the orchestrator can record them as
/// distinct signals.
pub async fn run_episode<T, F>(
    transport: T,
    map_id: u32,
    step_budget: u32,
    mut decide: F,
) -> Result<EpisodeOutcome, ProtocolError>
where
    T: MessageTransport,
    F: FnMut(&GameState) -> (u64, f64),
{
    let mut client = EpisodeClient::start(transport, map_id, step_budget).await?;
    loop {
        let state = match client.recv_state().await {
            Ok(state) => state,
            Err(ProtocolError::EpisodeEnded { actual_coverage }) => {
                return Ok(finished(&client, actual_coverage));
            }
            Err(err) => return Err(err),
        };

        let (state_id, usefulness) = decide(&state);
        client.send_action(state_id, usefulness).await?;

        match client.recv_reward().await {
            Ok(_reward) => {}
            Err(ProtocolError::EpisodeEnded { actual_coverage }) => {
                return Ok(finished(&client, actual_coverage));
            }
            Err(err) => return Err(err),
        }
    }
}

fn finished<T: MessageTransport>(
    client: &EpisodeClient<T>,
    actual_coverage: Option<u32>,
) -> EpisodeOutcome {
    let outcome = EpisodeOutcome {
        episode_id: client.episode_id(),
        steps: client.current_step(),
        actual_coverage,
    };
    debug!(
        episode = %outcome.episode_id,
        steps = outcome.steps,
        coverage = ?outcome.actual_coverage,
        "episode finished"
    );
    outcome
}
