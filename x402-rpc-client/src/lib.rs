//! Rust client for the Solana JSON-RPC API
//!
//! Covers the node methods x402-cli relies on: signature status and parsed
//! transaction lookups for verification, and balance, blockhash, submission
//! and confirmation for payments.
//!
//! # Example
//!
//! ```no_run
//! use x402_rpc_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .http_endpoint(url::Url::parse("https://api.devnet.solana.com")?)
//!         .build()?;
//!
//!     let balance = client
//!         .get_balance("So11111111111111111111111111111111111111112")
//!         .await?;
//!     println!("Balance: {}", balance);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod error;
pub mod http;
pub mod types;

// Re-export main types and traits
pub use client::{Client, ClientBuilder, ClientConfig};
pub use error::{Result, RpcClientError};

pub use types::{
    CommitmentLevel, LatestBlockhash, ParsedInstruction, ParsedTransaction,
    PartiallyDecodedInstruction, SendTransactionConfig, SignatureStatus, TransactionMeta,
    UiInstruction,
};

/// Get the version of this client library
pub fn client_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
