pub mod episode;
pub mod protocol;
pub mod transport;

pub use episode::{EpisodeClient, EpisodeOutcome, run_episode};
pub use protocol::{ClientMessage, GameState, ProtocolError, Reward, ServerMessage};
pub use transport::{ChannelTransport, MessageTransport, TransportError};
