/// Failure of a single PokeAPI request
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum FetchError {
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("{0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// Failure reading or writing the favorites document
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid favorites document: {0}")]
    Format(#[from] serde_json::Error),
}
