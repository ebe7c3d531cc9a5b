use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build upstream request: {0}")]
    RequestBuild(String),

    #[error("Upstream transport error: {0}")]
    Transport(String),

    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
