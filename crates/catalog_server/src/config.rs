//! Server configuration from command-line flags and environment.
//!
//! Every flag has a `CATALOG_*` environment fallback so the binary can run
//! unchanged under a process supervisor.

use catalog_core::db::MEMORY_DB_PATH;
use clap::Parser;
use std::net::{SocketAddr, ToSocketAddrs};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE: &str = "products.db";

/// Runtime settings for `catalog-server`.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "catalog-server", version, about = "Product catalog HTTP service")]
pub struct ServerConfig {
    /// Interface to bind.
    #[arg(long, env = "CATALOG_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// TCP port to bind.
    #[arg(long, env = "CATALOG_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SQLite database file; `:memory:` keeps everything in process memory.
    #[arg(long, env = "CATALOG_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "CATALOG_LOG_LEVEL", default_value = catalog_core::default_log_level())]
    pub log_level: String,

    /// Absolute directory for rotated log files. Logs go to stderr when unset.
    #[arg(long, env = "CATALOG_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Resolves `host:port` to the first matching socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|err| format!("cannot resolve host `{}`: {err}", self.host))?
            .next()
            .ok_or_else(|| format!("host `{}` resolved to no address", self.host))
    }

    /// Returns whether the configured store lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.database == MEMORY_DB_PATH
    }
}
