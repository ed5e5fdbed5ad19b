use thiserror::Error;
use tinylink_core::StorageError;

#[derive(Debug, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("alias already exists: {0}")]
    AliasConflict(String),
    #[error("no free alias found after {attempts} attempts")]
    AliasSpaceExhausted { attempts: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ShortenerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ShortenerError::Storage(err) if err.is_not_found())
    }
}
