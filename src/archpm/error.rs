use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchpmError {
    /// Every violated rule, in evaluation order.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// Carries the record noun ("Contact", "Project").
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database initialization failed: {0}")]
    Setup(#[source] rusqlite::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ArchpmError>;
