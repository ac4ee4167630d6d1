//! Error types for FinWise

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller input rejected before any storage access
    #[error("Validation error: {0}")]
    Validation(String),

    /// Stored data that cannot be processed, e.g. totals too large to represent
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic storage failure surfaced by the assistant; the cause is logged, not exposed
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl Error {
    /// True for failures that originate in the storage collaborator
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::Pool(_) | Error::Io(_) | Error::Storage(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_classification() {
        assert!(Error::Storage("boom".into()).is_storage());
        assert!(Error::Database(rusqlite::Error::QueryReturnedNoRows).is_storage());
        assert!(!Error::Validation("empty".into()).is_storage());
        assert!(!Error::Config("bad".into()).is_storage());
        assert!(!Error::InvalidData("overflow".into()).is_storage());
    }

    #[test]
    fn test_display() {
        let err = Error::Validation("Message is required".into());
        assert_eq!(err.to_string(), "Validation error: Message is required");
    }
}
