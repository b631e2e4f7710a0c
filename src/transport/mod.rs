pub mod channel;
pub mod errors;
pub mod traits;

pub use channel::ChannelTransport;
pub use errors::TransportError;
pub use traits::MessageTransport;
