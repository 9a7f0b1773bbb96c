use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorkboardError {
    #[error("Not in a corkboard project. Run 'corkboard init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .corkboard/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Ambiguous note id '{0}' matches more than one note")]
    AmbiguousId(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid storage backend: {0}")]
    InvalidBackend(String),

    #[error("{0}")]
    SizeRejected(String),

    #[error("Stacking order exhausted at z-index {0}")]
    StackingExhausted(i64),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, CorkboardError>;
