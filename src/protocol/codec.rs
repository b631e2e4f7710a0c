//! Envelope encoding and tag-first decoding.
//!
//! The discriminator is parsed before the payload: unknown discriminators are
//! rejected as [`ProtocolError::UnexpectedMessage`] without touching the body.

use serde::Deserialize;
use serde_json::Value;

use crate::protocol::errors::ProtocolError;
use crate::protocol::messages::{ClientMessage, GameOverBody, GameState, Reward, ServerMessage};

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "MessageType")]
    message_type: String,
    #[serde(rename = "MessageBody", default)]
    message_body: Value,
}

pub fn encode(message: &ClientMessage) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

pub fn decode(frame: &str) -> Result<ServerMessage, ProtocolError> {
    let envelope: Envelope = serde_json::from_str(frame)?;
    match envelope.message_type.as_str() {
        "GameState" => Ok(ServerMessage::GameState(GameState(envelope.message_body))),
        "MoveReward" => Ok(ServerMessage::MoveReward(Reward(envelope.message_body))),
        "IncorrectPredictedStateId" => Ok(ServerMessage::IncorrectPredictedStateId),
        "GameOver" => {
            // Some server builds send GameOver with a null body.
            let body = if envelope.message_body.is_null() {
                GameOverBody::default()
            } else {
                serde_json::from_value(envelope.message_body)?
            };
            Ok(ServerMessage::GameOver(body))
        }
        other => Err(ProtocolError::UnexpectedMessage {
            tag: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::messages::{StartBody, StepBody};
    use serde_json::json;

    #[test]
    fn start_message_matches_server_schema() {
        let message = ClientMessage::Start(StartBody {
            map_id: 42,
            steps_to_play: 10,
        });

        let encoded = encode(&message).unwrap();
        let as_value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(
            as_value,
            json!({
                "MessageType": "Start",
                "MessageBody": { "MapId": 42, "StepsToPlay": 10 }
            })
        );
    }

    #[test]
    fn step_message_matches_server_schema() {
        let message = ClientMessage::Step(StepBody {
            state_id: 7,
            predicted_state_usefulness: 0.3,
        });

        let encoded = encode(&message).unwrap();
        let as_value: Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(
            as_value,
            json!({
                "MessageType": "Step",
                "MessageBody": { "StateId": 7, "PredictedStateUsefulness": 0.3 }
            })
        );
    }

    #[test]
    fn decodes_game_state_with_opaque_body() {
        let frame = r#"{
            "MessageType": "GameState",
            "MessageBody": { "GraphVertices": [1, 2], "States": [] }
        }"#;

        let message = decode(frame).unwrap();
        match message {
            ServerMessage::GameState(GameState(body)) => {
                assert_eq!(body["GraphVertices"], json!([1, 2]));
            }
            other => panic!("expected GameState, got {other:?}"),
        }
    }

    #[test]
    fn decodes_game_over_with_coverage() {
        let frame = r#"{"MessageType": "GameOver", "MessageBody": {"ActualCoverage": 87}}"#;

        let message = decode(frame).unwrap();
        assert_eq!(
            message,
            ServerMessage::GameOver(GameOverBody {
                actual_coverage: Some(87),
            })
        );
    }

    #[test]
    fn game_over_coverage_stays_absent_when_body_is_null() {
        let frame = r#"{"MessageType": "GameOver", "MessageBody": null}"#;

        let message = decode(frame).unwrap();
        assert_eq!(
            message,
            ServerMessage::GameOver(GameOverBody {
                actual_coverage: None,
            })
        );
    }

    #[test]
    fn zero_coverage_is_not_absent_coverage() {
        let frame = r#"{"MessageType": "GameOver", "MessageBody": {"ActualCoverage": 0}}"#;

        let message = decode(frame).unwrap();
        assert_eq!(
            message,
            ServerMessage::GameOver(GameOverBody {
                actual_coverage: Some(0),
            })
        );
    }

    #[test]
    fn unknown_discriminator_is_rejected_with_its_tag() {
        let frame = r#"{"MessageType": "ServerShutdown", "MessageBody": {}}"#;

        let result = decode(frame);
        match result {
            Err(ProtocolError::UnexpectedMessage { tag }) => {
                assert_eq!(tag, "ServerShutdown");
            }
            other => panic!("expected UnexpectedMessage, got {other:?}"),
        }
    }

    #[test]
    fn malformed_envelope_is_a_codec_error() {
        let result = decode("not json at all");
        assert!(matches!(result, Err(ProtocolError::Codec(_))));
    }
}
