use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid share amount: {0}")]
    InvalidShares(String),

    #[error("Invalid account address: {0}")]
    InvalidAddress(String),

    #[error("Unknown network: {0} (expected mainnet or testnet)")]
    UnknownNetwork(String),
}
