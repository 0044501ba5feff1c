//! Error types for the Solana RPC client
//!
//! Every failure of an RPC round trip is expressed as an [`RpcClientError`].
//! Callers that only need a human-readable description can rely on `Display`;
//! callers that branch on the failure mode match on the nested enums.

use std::time::Duration;
use thiserror::Error;

/// Main error type for the RPC client
#[derive(Error, Debug)]
pub enum RpcClientError {
    /// HTTP-specific errors
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Transaction landed but did not reach the requested state
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),

    /// Timeout errors
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RpcClientError>;

/// HTTP-specific errors
#[derive(Error, Debug)]
pub enum HttpError {
    /// Request failed with HTTP error
    #[error("HTTP request failed with status {status}: {message}")]
    RequestFailed {
        /// The HTTP status code
        status: u16,
        /// The error message from the server
        message: String,
    },

    /// JSON-RPC error response
    #[error("RPC error {code}: {message}")]
    RpcError {
        /// The JSON-RPC error code
        code: i64,
        /// The error message
        message: String,
        /// The error data
        data: Option<serde_json::Value>,
    },

    /// Request building or sending failed
    #[error("Failed to send request: {0}")]
    RequestBuilder(#[from] reqwest::Error),

    /// Response body could not be read
    #[error("Failed to read response body")]
    ResponseBody(#[source] reqwest::Error),

    /// JSON-RPC envelope carried neither a result nor an error
    #[error("RPC response is missing a result")]
    MissingResult,
}

impl HttpError {
    /// Create an RPC error from a JSON-RPC error response
    pub fn from_rpc_error(code: i64, message: String, data: Option<serde_json::Value>) -> Self {
        Self::RpcError {
            code,
            message,
            data,
        }
    }
}

/// Validation errors for input data
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid signature format
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Invalid transaction data
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Serialization/deserialization errors
#[derive(Error, Debug)]
pub enum SerializationError {
    /// JSON deserialization failed
    #[error("Failed to deserialize from JSON: {source}")]
    JsonDeserialize {
        /// The source error
        #[source]
        source: serde_json::Error,
        /// The data that failed to deserialize
        data: String,
    },
}

/// Failures observed while waiting for a submitted transaction
#[derive(Error, Debug)]
pub enum TransactionError {
    /// The node reported an execution error for the signature
    #[error("Transaction {signature} failed: {err}")]
    Failed {
        /// The transaction signature
        signature: String,
        /// The raw error reported by the node
        err: serde_json::Value,
    },

    /// The blockhash expired before the transaction was confirmed
    #[error(
        "Transaction {signature} expired: block height exceeded {last_valid_block_height}"
    )]
    BlockhashExpired {
        /// The transaction signature
        signature: String,
        /// Last block height at which the transaction could land
        last_valid_block_height: u64,
    },
}

impl RpcClientError {
    /// Create a timeout error
    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout(duration)
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Http(HttpError::RequestBuilder(e)) => e.is_timeout() || e.is_connect(),
            Self::Http(HttpError::RequestFailed { status, .. }) => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get error code for JSON-RPC errors
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Self::Http(HttpError::RpcError { code, .. }) => Some(*code),
            _ => None,
        }
    }
}
