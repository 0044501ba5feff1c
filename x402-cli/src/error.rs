//! Error types for the x402 CLI

use thiserror::Error;
use x402_client::ClientError;
use x402_rpc_client::RpcClientError;

/// Main error type for the x402 CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// RPC client errors
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{message}")]
    Generic { message: String },

    /// The command already printed its outcome; only the exit code is left
    #[error("command failed with exit code {exit_code}")]
    Reported { exit_code: i32 },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid config format
    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Directory creation failed
    #[error("Failed to create config directory: {0}")]
    DirectoryCreation(std::io::Error),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Reported { exit_code } => *exit_code,
            _ => 1,
        }
    }
}

impl From<RpcClientError> for CliError {
    fn from(err: RpcClientError) -> Self {
        CliError::Rpc(err.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(message) => CliError::Validation(message),
            other => CliError::Generic {
                message: other.to_string(),
            },
        }
    }
}
