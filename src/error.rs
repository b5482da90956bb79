use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediScribeError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported audio format '{extension}' (expected one of: {expected})")]
    UnsupportedFormat { extension: String, expected: String },

    #[error("file too large: {size} bytes (maximum {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("transcription request failed with status {status}")]
    Api { status: u16 },

    #[error("failed to parse API response: {0}")]
    ApiParse(String),

    #[error("no history entry with id {0}")]
    HistoryEntryNotFound(String),

    #[error("history entry {id} is incomplete (missing {missing}) and cannot be loaded")]
    HistoryEntryIncomplete { id: String, missing: &'static str },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for MediScribeError {
    fn from(err: rusqlite::Error) -> Self {
        MediScribeError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MediScribeError>;
