//! Common types used across the client

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Commitment level
///
/// Also used for the `confirmationStatus` a node reports for a signature.
/// Variants are ordered by confirmation depth.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentLevel {
    /// Seen by the queried node, not yet voted on
    Processed,
    /// Voted on by a supermajority of the cluster
    #[default]
    Confirmed,
    /// Rooted; cannot be rolled back
    Finalized,
}

impl CommitmentLevel {
    /// The lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

impl fmt::Display for CommitmentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitmentLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(format!(
                "invalid commitment '{}': expected processed, confirmed or finalized",
                other
            )),
        }
    }
}

/// Response context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseContext {
    /// The slot number
    pub slot: u64,
}

/// Envelope used by methods that return `{context, value}`
#[derive(Debug, Clone, Deserialize)]
pub struct ContextResponse<T> {
    /// The slot at which the node evaluated the request
    pub context: ResponseContext,
    /// The actual payload
    pub value: T,
}

/// Commitment-only request configuration
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CommitmentConfig {
    /// Commitment level, omitted to use the node default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commitment: Option<CommitmentLevel>,
}

/// Result of getLatestBlockhash
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    /// Base58-encoded blockhash
    pub blockhash: String,
    /// Last block height at which a transaction using this blockhash is valid
    pub last_valid_block_height: u64,
}
