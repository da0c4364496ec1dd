use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "The Catalog Gateway", version)]
/// The Catalog Gateway
pub struct Args {
    /// IP address on which the server will listen for incoming connections.
    /// Defaults to 127.0.0.1:8080.
    #[arg(short, long)]
    pub listen_address: Option<SocketAddr>,
    /// Path to the TOML configuration file
    #[arg(long, short, env = "CATALOG_CONFIG_PATH", default_value = "./catalog.toml")]
    pub config: PathBuf,
    /// Set the logging level
    #[arg(long = "log", env = "CATALOG_LOG", default_value = "info")]
    pub log_level: String,
}
