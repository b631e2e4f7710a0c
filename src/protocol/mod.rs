pub mod codec;
pub mod errors;
pub mod messages;

pub use errors::ProtocolError;
pub use messages::{ClientMessage, GameOverBody, GameState, Reward, ServerMessage};
