use crate::config::StoreConfig;
use crate::error::{connection_error, is_unique_violation, schema_error, store_error};
use async_trait::async_trait;
use sqlx::{Connection, PgPool};
use tinylink_core::{check_save_input, Operation, Result, StorageError, UrlStore};
use tracing::{debug, info};

/// Schema provisioned on connect. Safe to run against an existing database.
pub const SCHEMA: &str = include_str!("../ddl/postgres/url.sql");

/// PostgreSQL implementation of the store contract.
///
/// Every operation runs in its own transaction. A transaction that is dropped
/// before `commit` is rolled back, so any early return through `?` leaves the
/// table untouched. Alias uniqueness is enforced by the `UNIQUE` constraint
/// rather than a lookup before insert.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a store from an existing pool without provisioning the schema.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool, verifies the backend answers, and provisions the schema.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let pool = config
            .pool_options()
            .connect(&config.database_url)
            .await
            .map_err(connection_error)?;

        ping(&pool).await?;
        Self::ensure_schema(&pool).await?;

        info!(
            max_connections = config.max_connections,
            "connected to postgres store"
        );
        Ok(Self::new(pool))
    }

    /// Shorthand for [`connect`](Self::connect) with default pool settings.
    pub async fn connect_url(database_url: &str) -> Result<Self> {
        Self::connect(&StoreConfig::builder().database_url(database_url).build()).await
    }

    /// Creates the `url` table and its alias index if they are missing.
    pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(pool)
            .await
            .map_err(schema_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

async fn ping(pool: &PgPool) -> Result<()> {
    let mut conn = pool.acquire().await.map_err(connection_error)?;
    conn.ping().await.map_err(connection_error)
}

#[async_trait]
impl UrlStore for PostgresStore {
    async fn save(&self, url: &str, alias: &str) -> Result<i64> {
        let op = Operation::Save;
        check_save_input(url, alias)?;

        let mut tx = self.pool.begin().await.map_err(store_error(op))?;

        let inserted = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO url (alias, url)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(alias)
        .bind(url)
        .fetch_one(&mut *tx)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(err) if is_unique_violation(&err) => {
                return Err(StorageError::AliasExists {
                    op,
                    alias: alias.to_string(),
                })
            }
            Err(err) => return Err(store_error(op)(err)),
        };

        tx.commit().await.map_err(store_error(op))?;

        debug!(alias, id, "saved url");
        Ok(id)
    }

    async fn get(&self, alias: &str) -> Result<String> {
        let op = Operation::Get;
        let mut tx = self.pool.begin().await.map_err(store_error(op))?;

        let url = sqlx::query_scalar::<_, String>(
            r#"
            SELECT url
            FROM url
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .fetch_optional(&mut *tx)
        .await
        .map_err(store_error(op))?;

        let Some(url) = url else {
            return Err(StorageError::NotFound {
                op,
                alias: alias.to_string(),
            });
        };

        tx.commit().await.map_err(store_error(op))?;

        debug!(alias, "resolved url");
        Ok(url)
    }

    async fn delete(&self, alias: &str) -> Result<()> {
        let op = Operation::Delete;
        let mut tx = self.pool.begin().await.map_err(store_error(op))?;

        let result = sqlx::query(
            r#"
            DELETE FROM url
            WHERE alias = $1
            "#,
        )
        .bind(alias)
        .execute(&mut *tx)
        .await
        .map_err(store_error(op))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                op,
                alias: alias.to_string(),
            });
        }

        tx.commit().await.map_err(store_error(op))?;

        debug!(alias, "deleted url");
        Ok(())
    }
}
