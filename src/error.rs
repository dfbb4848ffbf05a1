use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The container exists but its tables or cells cannot be read back.
    #[error("corrupt store: {0}")]
    CorruptStore(String),
    /// Caller input that must be re-entered. Raised before anything is written.
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptStore(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
