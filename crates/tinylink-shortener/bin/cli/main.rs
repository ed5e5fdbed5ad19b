mod cli;

use crate::cli::{Command, StorageBackendArg, CLI};
use anyhow::Context;
use tinylink_core::UrlStore;
use tinylink_generator::RandomGenerator;
use tinylink_shortener::ShortenerService;
use tinylink_storage::{InMemoryStore, PostgresStore, StoreConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = CLI::parse_checked();

    info!(
        storage_backend = %config.storage,
        alias_length = config.alias_length,
        max_attempts = config.max_attempts,
        "starting tinylink"
    );

    match config.storage {
        StorageBackendArg::InMemory => run(InMemoryStore::new(), &config).await,
        StorageBackendArg::Postgres => {
            let database_url = config
                .database_url
                .clone()
                .context("database url is required when storage backend is postgres")?;
            let store_config = StoreConfig::builder()
                .database_url(database_url)
                .max_connections(config.max_connections)
                .build();
            let store = PostgresStore::connect(&store_config).await?;
            run(store, &config).await
        }
    }
}

async fn run<S: UrlStore>(store: S, config: &CLI) -> anyhow::Result<()> {
    let generator = RandomGenerator::new(usize::from(config.alias_length));
    let service = ShortenerService::new(store, generator).with_max_attempts(config.max_attempts);

    match &config.command {
        Command::Shorten { url } => {
            let link = service.shorten(url).await?;
            println!("{}\t{}\t{}", link.id, link.alias, link.url);
        }
        Command::Save { url, alias } => {
            let link = service.shorten_with_alias(url, alias).await?;
            println!("{}\t{}\t{}", link.id, link.alias, link.url);
        }
        Command::Get { alias } => {
            let url = service.resolve(alias).await?;
            println!("{url}");
        }
        Command::Delete { alias } => {
            service.remove(alias).await?;
            println!("deleted {alias}");
        }
    }

    Ok(())
}
