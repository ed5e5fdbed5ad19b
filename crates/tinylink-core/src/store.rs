use crate::error::{Operation, StorageError};
use async_trait::async_trait;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A stored alias to URL mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// Surrogate key assigned by the store. Never reused.
    pub id: i64,
    /// The short alias used as the lookup key.
    pub alias: String,
    /// The original URL that was shortened.
    pub url: String,
}

/// Rejects an empty url or alias before it reaches a backend.
pub fn check_save_input(url: &str, alias: &str) -> Result<()> {
    let reason = if url.is_empty() {
        "url must not be empty"
    } else if alias.is_empty() {
        "alias must not be empty"
    } else {
        return Ok(());
    };

    Err(StorageError::InvalidInput {
        op: Operation::Save,
        reason: reason.to_string(),
    })
}

/// Durable mapping from alias to URL.
///
/// Aliases are write-once: there is no update. Uniqueness is enforced by the
/// store itself, so concurrent saves of the same alias produce exactly one
/// success and [`StorageError::AliasExists`] for the rest.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Saves a new record and returns its assigned id.
    ///
    /// Returns `Err(AliasExists)` if the alias is already taken.
    async fn save(&self, url: &str, alias: &str) -> Result<i64>;

    /// Returns the URL stored under `alias`.
    ///
    /// Returns `Err(NotFound)` if the alias does not exist.
    async fn get(&self, alias: &str) -> Result<String>;

    /// Removes the record stored under `alias`.
    ///
    /// Returns `Err(NotFound)` if nothing was removed.
    async fn delete(&self, alias: &str) -> Result<()>;
}

#[async_trait]
impl<S: UrlStore + ?Sized> UrlStore for std::sync::Arc<S> {
    async fn save(&self, url: &str, alias: &str) -> Result<i64> {
        (**self).save(url, alias).await
    }

    async fn get(&self, alias: &str) -> Result<String> {
        (**self).get(alias).await
    }

    async fn delete(&self, alias: &str) -> Result<()> {
        (**self).delete(alias).await
    }
}
