use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing required configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid Event Hub connection string: {0}")]
    InvalidConnectionString(String),

    #[error("Failed to serialize vitals record to JSON: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Transport request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Event Hub rejected the message: {0}")]
    TransportError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
