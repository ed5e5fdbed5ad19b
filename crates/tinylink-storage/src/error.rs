use tinylink_core::{Operation, StorageError};

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

/// Maps a driver error raised while serving `op` into [`StorageError::Store`].
pub(crate) fn store_error(op: Operation) -> impl FnOnce(sqlx::Error) -> StorageError {
    move |err| StorageError::store(op, err)
}

pub(crate) fn connection_error(err: sqlx::Error) -> StorageError {
    StorageError::Connection {
        op: Operation::Connect,
        source: err.into(),
    }
}

pub(crate) fn schema_error(err: sqlx::Error) -> StorageError {
    StorageError::Schema {
        op: Operation::Connect,
        source: err.into(),
    }
}
