use crate::error::ShortenerError;
use std::sync::Arc;
use tinylink_core::{StorageError, UrlStore};
use tinylink_generator::Generator;
use tracing::{debug, warn};
use url::Url;

type Result<T> = std::result::Result<T, ShortenerError>;

/// How many generated aliases are tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// A saved alias and the URL it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub alias: String,
    pub url: String,
}

/// Shortens URLs by pairing a [`Generator`] with a [`UrlStore`].
///
/// Generated aliases may collide with existing ones. A collision is reported
/// by the store on save and answered with a fresh alias, up to
/// `max_attempts` times.
#[derive(Debug)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    max_attempts: usize,
}

impl<S, G> Clone for ShortenerService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            max_attempts: self.max_attempts,
        }
    }
}

impl<S: UrlStore, G: Generator> ShortenerService<S, G> {
    pub fn new(store: S, generator: G) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the retry budget. At least one attempt is always made.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Accepts absolute `http` and `https` URLs with a host.
    fn validate_url(url: &str) -> Result<()> {
        let parsed =
            Url::parse(url).map_err(|e| ShortenerError::InvalidUrl(format!("{url}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL scheme must be http or https: {}",
                parsed.scheme()
            )));
        }

        if parsed.host_str().is_none() {
            return Err(ShortenerError::InvalidUrl(format!(
                "URL must have a host: {url}"
            )));
        }

        Ok(())
    }

    /// Saves `url` under a generated alias.
    pub async fn shorten(&self, url: &str) -> Result<ShortLink> {
        Self::validate_url(url)?;

        for attempt in 1..=self.max_attempts {
            let alias = self.generator.generate();

            match self.store.save(url, &alias).await {
                Ok(id) => {
                    debug!(%alias, id, attempt, "shortened url");
                    return Ok(ShortLink {
                        id,
                        alias,
                        url: url.to_string(),
                    });
                }
                Err(err) if err.is_alias_exists() => {
                    warn!(%alias, attempt, "generated alias collided, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(ShortenerError::AliasSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Saves `url` under a caller-chosen alias. No retry is made on conflict.
    pub async fn shorten_with_alias(&self, url: &str, alias: &str) -> Result<ShortLink> {
        Self::validate_url(url)?;

        let id = self.store.save(url, alias).await.map_err(|err| match err {
            StorageError::AliasExists { alias, .. } => ShortenerError::AliasConflict(alias),
            other => other.into(),
        })?;

        Ok(ShortLink {
            id,
            alias: alias.to_string(),
            url: url.to_string(),
        })
    }

    /// Returns the URL stored under `alias`.
    pub async fn resolve(&self, alias: &str) -> Result<String> {
        Ok(self.store.get(alias).await?)
    }

    /// Removes the alias.
    pub async fn remove(&self, alias: &str) -> Result<()> {
        Ok(self.store.delete(alias).await?)
    }
}
