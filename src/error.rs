use thiserror::Error;

#[derive(Error, Debug)]
pub enum RxError {
    #[error("GEMINI_API_KEY is not set. Export it or add it to a .env file.")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("Provider returned no completion text")]
    EmptyCompletion,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RxError>;
