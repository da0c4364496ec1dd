use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::{crate_version, Parser};
use tokio::runtime;
use tracing_subscriber::EnvFilter;

mod args;
mod config;
mod server;

use args::Args;

const THREAD_NAME: &str = "catalog-gateway";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = config::load(&args)?;

    let runtime = runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name(THREAD_NAME)
        .build()?;

    runtime.block_on(async move {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(&args.log_level))
            .init();

        let crate_version = crate_version!();
        tracing::info!("Catalog Gateway {crate_version}");

        const DEFAULT_LISTEN_ADDRESS: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8080);
        let listen_address = args
            .listen_address
            .or(config.network.listen_address)
            .unwrap_or(DEFAULT_LISTEN_ADDRESS);

        server::serve(listen_address, &config.graph.path).await
    })
}
