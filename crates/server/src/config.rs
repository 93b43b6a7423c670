// crates/server/src/config.rs
//! Command-line and environment configuration for the server binary.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Default port for the server.
pub const DEFAULT_PORT: u16 = 47893;

#[derive(Debug, Clone, Parser)]
#[command(name = "outreach-stats", version, about = "Outreach response-rate statistics API")]
pub struct Cli {
    /// Address to bind.
    #[arg(long, env = "OUTREACH_STATS_HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on. Falls back to `PORT` when unset.
    #[arg(long, env = "OUTREACH_STATS_PORT")]
    pub port: Option<u16>,

    /// SQLite database file. Defaults to the user cache directory.
    #[arg(long, env = "OUTREACH_STATS_DB")]
    pub db: Option<PathBuf>,
}

impl Cli {
    pub fn port(&self) -> u16 {
        self.port
            .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_args() {
        let cli = Cli::parse_from([
            "outreach-stats",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--db",
            "/tmp/stats.db",
        ]);
        assert_eq!(cli.addr(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cli.db.as_deref(), Some(std::path::Path::new("/tmp/stats.db")));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
