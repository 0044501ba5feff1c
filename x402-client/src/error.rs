//! Error types for the x402 client library

use thiserror::Error;
use x402_rpc_client::RpcClientError;
use x402_rpc_client::error::TransactionError;

/// Failure categories surfaced by payments and verifications
///
/// Each variant calls for a different remedy: fix the input, fund the payer,
/// re-check the signature, wait and retry, inspect the on-chain failure, or
/// check the connection to the node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Input rejected before any RPC call was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// The payer balance read from the node cannot cover the payment
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// The node has no record of the signature
    #[error("Not found: {0}")]
    NotFound(String),

    /// The transaction has not reached the requested commitment yet
    #[error("Pending: {0}")]
    Pending(String),

    /// The transaction landed but failed on chain
    #[error("Execution error: {0}")]
    Execution(String),

    /// The node could not be reached or answered with something unusable
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<RpcClientError> for ClientError {
    fn from(err: RpcClientError) -> Self {
        match &err {
            RpcClientError::Transaction(TransactionError::Failed { .. }) => {
                ClientError::Execution(err.to_string())
            }
            RpcClientError::Validation(_) => ClientError::Validation(err.to_string()),
            _ => ClientError::Transport(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use x402_rpc_client::error::{HttpError, ValidationError};

    #[test]
    fn test_rpc_errors_map_to_categories() {
        let failed = RpcClientError::Transaction(TransactionError::Failed {
            signature: "sig".to_string(),
            err: serde_json::json!({"InstructionError": [0, "Custom"]}),
        });
        assert!(matches!(ClientError::from(failed), ClientError::Execution(_)));

        let invalid =
            RpcClientError::Validation(ValidationError::InvalidTransaction("empty".to_string()));
        assert!(matches!(ClientError::from(invalid), ClientError::Validation(_)));

        let http = RpcClientError::Http(HttpError::RequestFailed {
            status: 502,
            message: "Bad Gateway".to_string(),
        });
        assert!(matches!(ClientError::from(http), ClientError::Transport(_)));

        let timeout = RpcClientError::timeout(Duration::from_secs(60));
        assert!(matches!(ClientError::from(timeout), ClientError::Transport(_)));
    }
}
