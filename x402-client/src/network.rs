//! Solana clusters the tool can talk to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// Target cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    #[default]
    Devnet,
    MainnetBeta,
    Testnet,
}

impl Network {
    /// Every supported cluster
    pub const ALL: [Network; 3] = [Network::Devnet, Network::MainnetBeta, Network::Testnet];

    /// Cluster name as used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::MainnetBeta => "mainnet-beta",
            Network::Testnet => "testnet",
        }
    }

    /// Public RPC endpoint of the cluster
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Network::Devnet => "https://api.devnet.solana.com",
            Network::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
        }
    }

    /// Solana Explorer link for a transaction on this cluster
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        match self {
            Network::MainnetBeta => format!("https://explorer.solana.com/tx/{}", signature),
            other => format!(
                "https://explorer.solana.com/tx/{}?cluster={}",
                signature,
                other.as_str()
            ),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Network::ALL
            .into_iter()
            .find(|network| network.as_str() == s)
            .ok_or_else(|| {
                ClientError::Validation(format!(
                    "Invalid network '{}'. Must be one of: devnet, mainnet-beta, testnet",
                    s
                ))
            })
    }
}
