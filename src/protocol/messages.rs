use serde::{Deserialize, Serialize};

/// Snapshot of the simulation sent by the server for the client to act upon.
///
/// The schema is owned by the server; the client passes it through to the
/// decision-making collaborator without interpreting any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameState(pub serde_json::Value);

/// Server feedback evaluating the most recent action. Opaque, like
/// [`GameState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reward(pub serde_json::Value);

/// Outbound messages. Serialized as `{"MessageType": ..., "MessageBody": ...}`
/// with the variant name as the discriminator, matching the server schema
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "MessageType", content = "MessageBody")]
pub enum ClientMessage {
    Start(StartBody),
    Step(StepBody),
}

impl ClientMessage {
    pub fn tag(&self) -> &'static str {
        match self {
            ClientMessage::Start(_) => "Start",
            ClientMessage::Step(_) => "Step",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartBody {
    #[serde(rename = "MapId")]
    pub map_id: u32,
    #[serde(rename = "StepsToPlay")]
    pub steps_to_play: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepBody {
    #[serde(rename = "StateId")]
    pub state_id: u64,
    #[serde(rename = "PredictedStateUsefulness")]
    pub predicted_state_usefulness: f64,
}

/// Inbound messages, decoded tag-first by [`codec::decode`].
///
/// [`codec::decode`]: crate::protocol::codec::decode
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    GameState(GameState),
    MoveReward(Reward),
    /// The server refused the state id from the last `Step`. Non-terminal,
    /// but the two sides have desynchronized expectations.
    IncorrectPredictedStateId,
    GameOver(GameOverBody),
}

impl ServerMessage {
    pub fn tag(&self) -> &'static str {
        match self {
            ServerMessage::GameState(_) => "GameState",
            ServerMessage::MoveReward(_) => "MoveReward",
            ServerMessage::IncorrectPredictedStateId => "IncorrectPredictedStateId",
            ServerMessage::GameOver(_) => "GameOver",
        }
    }
}

/// `GameOver` payload. `ActualCoverage` may be absent; absent and zero are
/// different terminal values and both are preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct GameOverBody {
    #[serde(rename = "ActualCoverage", default)]
    pub actual_coverage: Option<u32>,
}
