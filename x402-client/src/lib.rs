//! Payment and verification library behind x402-cli
//!
//! Builds on `x402-rpc-client` to send native SOL payments and to derive a
//! verdict for a transaction signature from what a node reports about it.
//!
//! # Example
//!
//! ```no_run
//! use x402_client::{Network, Verifier, VerifyOptions};
//! use x402_rpc_client::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = VerifyOptions {
//!     network: Network::Devnet,
//!     ..VerifyOptions::default()
//! };
//! let client = Client::builder()
//!     .http_endpoint(url::Url::parse(options.endpoint())?)
//!     .build()?;
//!
//! let result = Verifier::new(client).verify("5VERv8NMvz...", &options).await;
//! println!("{}: {}", result.status, result.message);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod gateway;
pub mod network;
pub mod pay;
pub mod units;
pub mod verify;

pub use error::ClientError;
pub use gateway::RpcGateway;
pub use network::Network;
pub use pay::{FEE_RESERVE_LAMPORTS, PaymentRequest, PaymentResult, PaymentStatus, PaymentSubmitter};
pub use verify::{
    VerificationResult, VerificationStatus, Verifier, VerifyOptions, verify_signature,
};

pub use x402_rpc_client::CommitmentLevel;

/* Convenience type alias for Result */
pub type Result<T> = std::result::Result<T, ClientError>;
