//! HTTP server command
//!
//! Opens the document store once, hands it to the server, and blocks
//! until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use coursectl_server::store::{
    DocumentStore, MemoryStore, PgDocumentStore, DEFAULT_MAX_CONNECTIONS,
};
use coursectl_server::{run_server, LookupFailurePolicy, ServerConfig};

use crate::config::DatabaseSettings;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "COURSECTL_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep documents in process memory instead of Postgres
    #[arg(long)]
    pub in_memory: bool,

    /// Maximum database connections
    #[arg(long, env = "COURSECTL_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// What a failed course lookup does to /my-enrolls (fail-request or degrade)
    #[arg(long, env = "COURSECTL_LOOKUP_FAILURE", default_value = "fail-request")]
    pub lookup_failure: LookupFailurePolicy,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, env = "COURSECTL_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(flatten)]
    pub database: DatabaseSettings,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            lookup_policy: self.lookup_failure,
            request_timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

async fn open_store(args: &ServeArgs) -> Result<Arc<dyn DocumentStore>> {
    if args.in_memory {
        tracing::warn!("Using in-memory document store - data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let database_url = args.database.resolve_url().context(
        "database not configured. Set DATABASE_URL, or DB_USER and DB_PASS (env, .env or flags), or pass --in-memory",
    )?;

    let store = PgDocumentStore::connect(&database_url, args.max_connections)
        .await
        .context("Failed to connect to document store")?;
    Ok(Arc::new(store))
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting coursectl server on {}", args.bind);

    let store = open_store(&args).await?;
    let config = args.server_config();

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse with every env-backed server flag given on the command line, so
    /// COURSECTL_* variables in the environment cannot leak in.
    fn parse(extra: &[&str]) -> Result<ServeArgs, clap::Error> {
        let mut argv = vec!["serve"];
        for (flag, value) in [
            ("--bind", "127.0.0.1:3000"),
            ("--max-connections", "5"),
            ("--lookup-failure", "fail-request"),
        ] {
            if !extra.contains(&flag) {
                argv.extend([flag, value]);
            }
        }
        argv.extend_from_slice(extra);
        ServeArgs::try_parse_from(argv)
    }

    #[test]
    fn parses_flags_into_server_config() {
        let args = parse(&[
            "--bind",
            "0.0.0.0:8080",
            "--lookup-failure",
            "degrade",
            "--timeout-secs",
            "15",
            "--in-memory",
        ])
        .unwrap();

        assert!(args.in_memory);
        let config = args.server_config();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.lookup_policy, LookupFailurePolicy::Degrade);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert!(!config.cors_permissive);
    }

    #[test]
    fn explicit_defaults_build_a_strict_config() {
        let args = parse(&["--timeout-secs", "30"]).unwrap();
        assert_eq!(args.max_connections, DEFAULT_MAX_CONNECTIONS);

        let config = args.server_config();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.lookup_policy, LookupFailurePolicy::FailRequest);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn rejects_unknown_policy() {
        let result = parse(&["--lookup-failure", "retry"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn in_memory_store_needs_no_database() {
        let args = parse(&["--in-memory"]).unwrap();
        let store = open_store(&args).await.unwrap();
        assert_eq!(store.kind(), "memory");
    }
}
