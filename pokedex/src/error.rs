use std::io;
use std::sync::Arc;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("please enter a Pokémon name or ID")]
    InvalidInput,
    #[error("\"{query}\" was not found, try a valid name or ID (e.g. pikachu or 25)")]
    NotFound { query: String },
    #[error("request failed: {0}")]
    RequestFailed(Arc<reqwest::Error>),
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(String),
    #[error("team could not be saved: {0}")]
    StorageWriteFailed(Arc<io::Error>),
    #[error("team could not be exported: {0}")]
    ExportFailed(Arc<io::Error>),
    #[error("team could not be serialized: {0}")]
    Serialization(Arc<serde_json::Error>),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::RequestFailed(Arc::new(error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(error))
    }
}
