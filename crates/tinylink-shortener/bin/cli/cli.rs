use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::fmt::{Display, Formatter};

pub const STORAGE_BACKEND_ENV: &str = "TINYLINK_STORAGE_BACKEND";
pub const DATABASE_URL_ENV: &str = "TINYLINK_DATABASE_URL";
pub const MAX_CONNECTIONS_ENV: &str = "TINYLINK_MAX_CONNECTIONS";
pub const ALIAS_LENGTH_ENV: &str = "TINYLINK_ALIAS_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "TINYLINK_MAX_ATTEMPTS";

pub const DEFAULT_MAX_CONNECTIONS: &str = "5";
pub const DEFAULT_ALIAS_LENGTH: &str = "6";
pub const DEFAULT_MAX_ATTEMPTS: &str = "5";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "postgres")]
    Postgres,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Postgres => write!(f, "postgres"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tinylink", about = "Store and resolve short URL aliases")]
pub struct CLI {
    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::Postgres
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DATABASE_URL_ENV)]
    pub database_url: Option<String>,

    #[arg(long, env = MAX_CONNECTIONS_ENV, default_value = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    #[arg(
        long,
        env = ALIAS_LENGTH_ENV,
        default_value = DEFAULT_ALIAS_LENGTH,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub alias_length: u16,

    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    #[command(subcommand)]
    pub command: Command,
}

impl CLI {
    /// Parses the process arguments, exiting with a usage error on failure.
    pub fn parse_checked() -> Self {
        let cli = Self::parse();
        if let Err(err) = cli.check() {
            err.exit();
        }
        cli
    }

    /// Rules that span several arguments.
    ///
    /// The in-memory store starts empty on every run, so only commands that
    /// write can succeed against it.
    pub fn check(&self) -> Result<(), clap::Error> {
        match self.storage {
            StorageBackendArg::Postgres if self.database_url.is_none() => {
                Err(Self::command().error(
                    ErrorKind::MissingRequiredArgument,
                    format!(
                        "--database-url (or {DATABASE_URL_ENV}) is required when storage backend is postgres"
                    ),
                ))
            }
            StorageBackendArg::InMemory
                if matches!(self.command, Command::Get { .. } | Command::Delete { .. }) =>
            {
                Err(Self::command().error(
                    ErrorKind::ArgumentConflict,
                    "get and delete need a persistent backend; the in-memory store starts empty on every run",
                ))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a URL under a generated alias.
    Shorten { url: String },
    /// Save a URL under the given alias.
    Save { url: String, alias: String },
    /// Print the URL stored under an alias.
    Get { alias: String },
    /// Remove an alias.
    Delete { alias: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CLI, clap::Error> {
        let cli = CLI::try_parse_from(args)?;
        cli.check()?;
        Ok(cli)
    }

    #[test]
    fn defaults_to_postgres() {
        let cli = parse(&[
            "tinylink",
            "--database-url",
            "postgres://localhost/tinylink",
            "get",
            "abc123",
        ])
        .unwrap();

        assert_eq!(cli.storage, StorageBackendArg::Postgres);
        assert_eq!(cli.alias_length, 6);
        assert_eq!(cli.max_attempts, 5);
        assert!(matches!(cli.command, Command::Get { ref alias } if alias == "abc123"));
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = parse(&["tinylink", "get", "abc"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = parse(&["tinylink", "--storage", "postgres", "delete", "abc"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let cli = parse(&[
            "tinylink",
            "--storage",
            "postgres",
            "--database-url",
            "postgres://localhost/tinylink",
            "save",
            "https://example.com",
            "abc123",
        ])
        .unwrap();
        assert_eq!(cli.database_url.as_deref(), Some("postgres://localhost/tinylink"));
        assert!(matches!(cli.command, Command::Save { .. }));
    }

    #[test]
    fn in_memory_only_accepts_writes() {
        for command in [&["get", "abc123"][..], &["delete", "abc123"][..]] {
            let mut args = vec!["tinylink", "--storage", "in-memory"];
            args.extend_from_slice(command);

            let err = parse(&args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        }

        let cli = parse(&["tinylink", "--storage", "in-memory", "shorten", "https://example.com"])
            .unwrap();
        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert!(parse(&["tinylink", "--storage", "in-memory", "save", "https://example.com", "a"]).is_ok());
    }

    #[test]
    fn alias_length_must_be_positive() {
        let err = parse(&[
            "tinylink",
            "--storage",
            "in-memory",
            "--alias-length",
            "0",
            "shorten",
            "https://example.com",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);

        let cli = parse(&[
            "tinylink",
            "--storage",
            "in-memory",
            "--alias-length",
            "1",
            "shorten",
            "https://example.com",
        ])
        .unwrap();
        assert_eq!(cli.alias_length, 1);
    }
}
