//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the storage contract shared by the store
//! implementations and by the shortener that drives them.

pub mod error;
pub mod store;

pub use error::{BoxError, Operation, StorageError};
pub use store::{check_save_input, Result, UrlRecord, UrlStore};
