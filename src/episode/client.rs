use tracing::debug;
use uuid::Uuid;

use crate::protocol::codec;
use crate::protocol::errors::ProtocolError;
use crate::protocol::messages::{
    ClientMessage, GameState, Reward, ServerMessage, StartBody, StepBody,
};
use crate::transport::traits::MessageTransport;

/// Which operation the protocol expects next. `AwaitingFeedback` carries the
/// state id from the `Step` that put us there, so feedback validation never
/// reads a stale value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingState,
    AwaitingFeedback { state_id: u64 },
}

/// Drives one episode against the game server over a message transport.
///
/// The caller alternates `recv_state` → `send_action` → `recv_reward` until a
/// receive operation returns [`ProtocolError::EpisodeEnded`]. One instance per
/// episode, one caller per instance; a terminated client only ever repeats its
/// stored terminal outcome and must be discarded.
pub struct EpisodeClient<T> {
    transport: T,
    episode_id: Uuid,
    map_id: u32,
    step_budget: u32,
    current_step: u32,
    phase: Phase,
    game_over: bool,
    final_coverage: Option<u32>,
}

impl<T: MessageTransport> EpisodeClient<T> {
    /// Opens an episode on `map_id` with the given step budget. Sends exactly
    /// one `Start` message; the only failure mode is the transport itself.
    pub async fn start(
        transport: T,
        map_id: u32,
        step_budget: u32,
    ) -> Result<Self, ProtocolError> {
        let mut client = Self {
            transport,
            episode_id: Uuid::new_v4(),
            map_id,
            step_budget,
            current_step: 0,
            phase: Phase::AwaitingState,
            game_over: false,
            final_coverage: None,
        };
        client
            .send(&ClientMessage::Start(StartBody {
                map_id,
                steps_to_play: step_budget,
            }))
            .await?;
        Ok(client)
    }

    pub fn episode_id(&self) -> Uuid {
        self.episode_id
    }

    pub fn map_id(&self) -> u32 {
        self.map_id
    }

    pub fn step_budget(&self) -> u32 {
        self.step_budget
    }

    /// Count of completed action/feedback round-trips.
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// The state id sent by the last `send_action`, until its feedback is
    /// consumed.
    pub fn sent_state_id(&self) -> Option<u64> {
        match self.phase {
            Phase::AwaitingState => None,
            Phase::AwaitingFeedback { state_id } => Some(state_id),
        }
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Receives the next game state.
    ///
    /// Returns [`ProtocolError::EpisodeEnded`] if the server terminates the
    /// episode instead, and keeps returning it (without touching the
    /// transport) on every receive after that.
    pub async fn recv_state(&mut self) -> Result<GameState, ProtocolError> {
        if self.game_over {
            return Err(self.ended());
        }
        if let Phase::AwaitingFeedback { .. } = self.phase {
            return Err(self.wrong_order("recv_state"));
        }
        match self.recv_or_game_over().await? {
            ServerMessage::GameState(state) => Ok(state),
            other => Err(ProtocolError::UnexpectedMessage {
                tag: other.tag().to_string(),
            }),
        }
    }

    /// Sends the chosen `(state_id, predicted_usefulness)` action and records
    /// the id for feedback validation.
    pub async fn send_action(
        &mut self,
        state_id: u64,
        predicted_usefulness: f64,
    ) -> Result<(), ProtocolError> {
        if let Phase::AwaitingFeedback { .. } = self.phase {
            return Err(self.wrong_order("send_action"));
        }
        self.send(&ClientMessage::Step(StepBody {
            state_id,
            predicted_state_usefulness: predicted_usefulness,
        }))
        .await?;
        self.phase = Phase::AwaitingFeedback { state_id };
        Ok(())
    }

    /// Receives the server's feedback for the last sent action.
    ///
    /// On success increments the step counter by exactly one. Returns
    /// [`ProtocolError::RejectedAction`] if the server refused the sent state
    /// id, [`ProtocolError::EpisodeEnded`] on terminal.
    pub async fn recv_reward(&mut self) -> Result<Reward, ProtocolError> {
        if self.game_over {
            return Err(self.ended());
        }
        let state_id = match self.phase {
            Phase::AwaitingFeedback { state_id } => state_id,
            Phase::AwaitingState => return Err(self.wrong_order("recv_reward")),
        };
        match self.recv_or_game_over().await? {
            ServerMessage::MoveReward(reward) => {
                self.current_step += 1;
                self.phase = Phase::AwaitingState;
                Ok(reward)
            }
            ServerMessage::IncorrectPredictedStateId => Err(ProtocolError::RejectedAction {
                state_id,
                at_step: self.current_step,
            }),
            other => Err(ProtocolError::UnexpectedMessage {
                tag: other.tag().to_string(),
            }),
        }
    }

    async fn send(&mut self, message: &ClientMessage) -> Result<(), ProtocolError> {
        debug!(episode = %self.episode_id, tag = message.tag(), "--> client message");
        let frame = codec::encode(message)?;
        self.transport.send(frame).await?;
        Ok(())
    }

    /// Consumes one inbound frame. `GameOver` latches the terminal state and
    /// surfaces as `EpisodeEnded`; everything else is handed back to the
    /// caller for phase-specific dispatch.
    async fn recv_or_game_over(&mut self) -> Result<ServerMessage, ProtocolError> {
        let frame = self.transport.recv().await?;
        let message = codec::decode(&frame)?;
        debug!(episode = %self.episode_id, tag = message.tag(), "<-- server message");
        if let ServerMessage::GameOver(body) = message {
            self.game_over = true;
            self.final_coverage = body.actual_coverage;
            return Err(self.ended());
        }
        Ok(message)
    }

    fn ended(&self) -> ProtocolError {
        ProtocolError::EpisodeEnded {
            actual_coverage: self.final_coverage,
        }
    }

    fn wrong_order(&self, called: &'static str) -> ProtocolError {
        let expected = match self.phase {
            Phase::AwaitingState => "recv_state or send_action",
            Phase::AwaitingFeedback { .. } => "recv_reward",
        };
        ProtocolError::WrongOperationOrder {
            called,
            expected,
            at_step: self.current_step,
        }
    }
}
