use anyhow::{Context, Result};

use crate::config::NetworkArgs;

pub fn run(network: &NetworkArgs) -> Result<()> {
    let config = network.client_config();

    let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    rt.block_on(async {
        intuition_mcp::run_stdio(config)
            .await
            .map_err(|e| anyhow::anyhow!("MCP server error: {e}"))
    })
}
