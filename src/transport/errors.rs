use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection closed")]
    Closed,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
