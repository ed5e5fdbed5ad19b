use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Boxed cause kept behind a [`StorageError`] for diagnostics.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The store operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Connecting to the backend and provisioning the schema.
    Connect,
    Save,
    Get,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Connect => "storage.connect",
            Operation::Save => "storage.save",
            Operation::Get => "storage.get",
            Operation::Delete => "storage.delete",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`UrlStore`](crate::UrlStore) implementations.
///
/// Every variant records which [`Operation`] failed. Backend failures keep the
/// driver error as their `source`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or verified.
    #[error("{op}: cannot connect to storage backend")]
    Connection {
        op: Operation,
        #[source]
        source: BoxError,
    },
    /// The backing schema could not be provisioned.
    #[error("{op}: cannot provision storage schema")]
    Schema {
        op: Operation,
        #[source]
        source: BoxError,
    },
    /// The alias is already taken. Callers may retry with a new alias.
    #[error("{op}: alias already exists: {alias}")]
    AliasExists { op: Operation, alias: String },
    /// No record matches the alias.
    #[error("{op}: alias not found: {alias}")]
    NotFound { op: Operation, alias: String },
    /// The request was rejected before reaching the backend.
    #[error("{op}: invalid input: {reason}")]
    InvalidInput { op: Operation, reason: String },
    /// Any other persistence failure.
    #[error("{op}: storage operation failed")]
    Store {
        op: Operation,
        #[source]
        source: BoxError,
    },
}

impl StorageError {
    /// Returns the operation that failed.
    pub fn operation(&self) -> Operation {
        match self {
            StorageError::Connection { op, .. }
            | StorageError::Schema { op, .. }
            | StorageError::AliasExists { op, .. }
            | StorageError::NotFound { op, .. }
            | StorageError::InvalidInput { op, .. }
            | StorageError::Store { op, .. } => *op,
        }
    }

    pub fn is_alias_exists(&self) -> bool {
        matches!(self, StorageError::AliasExists { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    pub fn store(op: Operation, source: impl Into<BoxError>) -> Self {
        StorageError::Store {
            op,
            source: source.into(),
        }
    }
}
