//! URL shortener service.
//!
//! Drives a [`UrlStore`](tinylink_core::UrlStore) with aliases from a
//! [`Generator`](tinylink_generator::Generator), retrying on collisions.

pub mod error;
pub mod service;

pub use error::ShortenerError;
pub use service::{ShortLink, ShortenerService, DEFAULT_MAX_ATTEMPTS};
