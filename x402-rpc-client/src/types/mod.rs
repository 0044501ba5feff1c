//! Data types for the Solana RPC client

pub mod common;
pub mod transaction;

// Re-export commonly used types
pub use common::{CommitmentConfig, CommitmentLevel, ContextResponse, LatestBlockhash, ResponseContext};
pub use transaction::{
    GetTransactionConfig, ParsedInstruction, ParsedMessage, ParsedTransaction,
    ParsedTransactionBody, PartiallyDecodedInstruction, SendTransactionConfig, SignatureStatus,
    SignatureStatusConfig, TransactionMeta, UiInstruction,
};
