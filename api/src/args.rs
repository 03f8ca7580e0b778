use std::path::PathBuf;

use bootcamp_core::domain::common::{BootcampConfig, DatabaseConfig, QueryConfig, StorageBackend};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "bootcamp-api", version, about = "Bootcamp marketplace API")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Load or remove seed data.
    Seed {
        #[command(subcommand)]
        action: SeedAction,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SeedAction {
    /// Import `bootcamps.json`, `courses.json` and `reviews.json` from a directory.
    Import {
        #[arg(long, default_value = "data")]
        dir: PathBuf,
    },
    /// Delete every bootcamp, course and review.
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageArg {
    Postgres,
    Memory,
}

impl From<StorageArg> for StorageBackend {
    fn from(value: StorageArg) -> Self {
        match value {
            StorageArg::Postgres => StorageBackend::Postgres,
            StorageArg::Memory => StorageBackend::Memory,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct DatabaseArgs {
    #[arg(long = "database-url", env = "DATABASE_URL")]
    pub url: Option<String>,

    #[arg(long, env = "STORAGE", value_enum, default_value = "postgres")]
    pub storage: StorageArg,

    #[arg(
        long = "database-max-connections",
        env = "DATABASE_MAX_CONNECTIONS",
        default_value_t = 10
    )]
    pub max_connections: u32,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3010)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "server-tls-cert", env = "SERVER_TLS_CERT")]
    pub tls_cert: Option<PathBuf>,

    #[arg(long = "server-tls-key", env = "SERVER_TLS_KEY")]
    pub tls_key: Option<PathBuf>,

    /// Expose `/metrics` and record request metrics.
    #[arg(
        long = "server-metrics",
        env = "SERVER_METRICS",
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub metrics: bool,

    /// Seed directory imported before the server starts accepting requests.
    #[arg(long = "server-seed-dir", env = "SERVER_SEED_DIR")]
    pub seed_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct QueryArgs {
    #[arg(
        long = "query-default-limit",
        env = "QUERY_DEFAULT_LIMIT",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub default_limit: u64,

    #[arg(
        long = "query-max-limit",
        env = "QUERY_MAX_LIMIT",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub max_limit: u64,
}

impl From<Args> for BootcampConfig {
    fn from(args: Args) -> Self {
        BootcampConfig {
            database: DatabaseConfig {
                url: args.database.url,
                max_connections: args.database.max_connections,
            },
            storage: args.database.storage.into(),
            query: QueryConfig {
                default_limit: args.query.default_limit.max(1),
                max_limit: args.query.max_limit.max(1),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["bootcamp-api"]);
        assert!(args.command.is_none());
        assert_eq!(args.server.port, 3010);
        assert!(args.server.metrics);
        assert_eq!(args.query.default_limit, 5);
    }

    #[test]
    fn test_config_from_args() {
        let args = Args::parse_from([
            "bootcamp-api",
            "--storage",
            "memory",
            "--server-metrics",
            "false",
            "--query-max-limit",
            "20",
            "seed",
            "import",
            "--dir",
            "fixtures",
        ]);
        assert!(!args.server.metrics);
        assert!(matches!(
            args.command,
            Some(Command::Seed {
                action: SeedAction::Import { .. }
            })
        ));

        let config = BootcampConfig::from(args);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.query.max_limit, 20);
    }

    #[test]
    fn test_query_limits_must_be_positive() {
        for flag in ["--query-default-limit", "--query-max-limit"] {
            let result = Args::try_parse_from(["bootcamp-api", flag, "0"]);
            assert!(result.is_err(), "{flag} 0 was accepted");
        }

        let args = Args::parse_from(["bootcamp-api", "--query-default-limit", "1"]);
        assert_eq!(BootcampConfig::from(args).query.default_limit, 1);
    }

    #[test]
    fn test_config_clamps_zero_default_limit() {
        let mut args = Args::parse_from(["bootcamp-api"]);
        args.query.default_limit = 0;
        assert_eq!(BootcampConfig::from(args).query.default_limit, 1);
    }
}
