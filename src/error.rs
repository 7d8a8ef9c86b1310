use thiserror::Error;

/// Failure kinds surfaced across the session, generation and store boundaries
#[derive(Error, Debug)]
pub enum Error {
    /// Generate-mode call ended before every required field was collected
    #[error("missing collected fields: {}", .0.join(", "))]
    MissingCollectedField(Vec<&'static str>),

    /// Model output could not be read as a question list (or feedback object)
    #[error("could not parse model output: {0}")]
    GenerationParse(String),

    /// Text generation service refused the request or returned nothing
    #[error("generation failed: {0}")]
    Generation(String),

    /// Document store rejected a read or write
    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("voice client error: {0}")]
    VoiceClient(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
