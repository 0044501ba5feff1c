//! Transaction-related types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::CommitmentLevel;

/// Signature status from getSignatureStatuses
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    /// The slot the transaction was processed in
    pub slot: Option<u64>,
    /// Number of blocks since confirmation, null once rooted
    #[serde(default)]
    pub confirmations: Option<u64>,
    /// Error information (null for success)
    #[serde(default)]
    pub err: Option<Value>,
    /// The cluster confirmation depth
    #[serde(default)]
    pub confirmation_status: Option<CommitmentLevel>,
}

impl SignatureStatus {
    /// Whether the status has reached at least `commitment`
    ///
    /// Nodes omit `confirmationStatus` for rooted signatures from old
    /// history; those report `confirmations: null` and count as finalized.
    pub fn satisfies_commitment(&self, commitment: CommitmentLevel) -> bool {
        match self.confirmation_status {
            Some(level) => level >= commitment,
            None => self.confirmations.is_none(),
        }
    }
}

/// Configuration for getSignatureStatuses
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatusConfig {
    /// Search beyond the node's recent status cache
    pub search_transaction_history: bool,
}

/// Configuration for getTransaction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionConfig {
    /// Response encoding, always `jsonParsed` for this client
    pub encoding: &'static str,
    /// Highest transaction version the caller can handle
    pub max_supported_transaction_version: u8,
    /// Commitment level, omitted to use the node default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commitment: Option<CommitmentLevel>,
}

impl GetTransactionConfig {
    /// jsonParsed request at the given commitment
    ///
    /// getTransaction rejects `processed`, so it is raised to `confirmed`.
    pub fn parsed(commitment: Option<CommitmentLevel>) -> Self {
        Self {
            encoding: "jsonParsed",
            max_supported_transaction_version: 0,
            commitment: commitment.map(|level| match level {
                CommitmentLevel::Processed => CommitmentLevel::Confirmed,
                level => level,
            }),
        }
    }
}

/// Configuration for sendTransaction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionConfig {
    /// Skip the node's preflight simulation
    pub skip_preflight: bool,
    /// Commitment used for preflight simulation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preflight_commitment: Option<CommitmentLevel>,
    /// Wire encoding of the transaction
    pub encoding: &'static str,
    /// Maximum number of times the node retries forwarding the transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<usize>,
}

impl Default for SendTransactionConfig {
    fn default() -> Self {
        Self {
            skip_preflight: false,
            preflight_commitment: Some(CommitmentLevel::Confirmed),
            encoding: "base64",
            max_retries: None,
        }
    }
}

/// Transaction from getTransaction with `jsonParsed` encoding
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    /// The slot the transaction was processed in
    pub slot: u64,
    /// Estimated production time, as Unix timestamp (seconds)
    #[serde(default)]
    pub block_time: Option<i64>,
    /// Execution metadata
    #[serde(default)]
    pub meta: Option<TransactionMeta>,
    /// The transaction body
    pub transaction: ParsedTransactionBody,
    /// Transaction version (`"legacy"` or a number)
    #[serde(default)]
    pub version: Option<Value>,
}

/// Transaction status metadata
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    /// Error if the transaction failed
    #[serde(default)]
    pub err: Option<Value>,
    /// Fee charged, in lamports
    pub fee: u64,
    /// Log output, absent when log recording was disabled
    #[serde(default)]
    pub log_messages: Option<Vec<String>>,
}

/// Signed transaction body
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedTransactionBody {
    /// Base58 signatures
    #[serde(default)]
    pub signatures: Vec<String>,
    /// The message
    pub message: ParsedMessage,
}

/// Transaction message
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMessage {
    /// Top-level instructions in execution order
    #[serde(default)]
    pub instructions: Vec<UiInstruction>,
    /// Blockhash the transaction was built against
    #[serde(default)]
    pub recent_blockhash: Option<String>,
}

/// Instruction as returned under `jsonParsed` encoding
///
/// A node parses instructions for programs it knows about; the rest are
/// returned with raw accounts and data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UiInstruction {
    /// Instruction decoded by the node
    Parsed(ParsedInstruction),
    /// Instruction of a program the node cannot decode
    PartiallyDecoded(PartiallyDecodedInstruction),
}

/// Decoded instruction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedInstruction {
    /// Program name, e.g. `system` or `spl-memo`
    pub program: String,
    /// Base58 program id
    pub program_id: String,
    /// Program-specific payload
    pub parsed: Value,
    /// Invocation depth
    #[serde(default)]
    pub stack_height: Option<u32>,
}

/// Undecoded instruction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartiallyDecodedInstruction {
    /// Base58 program id
    pub program_id: String,
    /// Base58 account addresses
    pub accounts: Vec<String>,
    /// Base58 instruction data
    pub data: String,
    /// Invocation depth
    #[serde(default)]
    pub stack_height: Option<u32>,
}
