use clap::Args;
use tracing::debug;

use intuition_core::Network;
use intuition_query::{ClientConfig, DEFAULT_TIMEOUT_SECS};

/// Where and how to reach the GraphQL endpoint.
#[derive(Debug, Args)]
pub struct NetworkArgs {
    /// Query testnet instead of mainnet
    #[arg(long, global = true)]
    pub testnet: bool,

    /// GraphQL endpoint URL (overrides the network default)
    #[arg(long, global = true, env = "INTUITION_GRAPHQL_URL", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long,
        global = true,
        env = "INTUITION_TIMEOUT_SECS",
        value_name = "SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

impl NetworkArgs {
    pub fn network(&self) -> Network {
        Network::from_testnet_flag(self.testnet)
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::for_network(self.network()).with_timeout_secs(self.timeout);
        if let Some(endpoint) = &self.endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        debug!(
            network = %self.network(),
            endpoint = %config.endpoint,
            timeout_secs = self.timeout,
            "resolved client config"
        );
        config
    }
}
