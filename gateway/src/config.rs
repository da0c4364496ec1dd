use std::{fs, net::SocketAddr};

use serde::Deserialize;

use crate::args::Args;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub network: NetworkConfig,
    pub graph: GraphConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    pub listen_address: Option<SocketAddr>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// The route the GraphQL endpoint is served under.
    pub path: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: "/product".to_string(),
        }
    }
}

/// Loads the configuration file named by the arguments. A missing file is
/// not an error; everything has a default.
pub fn load(args: &Args) -> anyhow::Result<Config> {
    let contents = match fs::read_to_string(&args.config) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => return Err(anyhow::anyhow!("reading configuration: {err}")),
    };
    toml::from_str(&contents).map_err(|err| anyhow::anyhow!("parsing configuration: {err}"))
}
