//! CLI argument parsing and command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// x402-cli - send and verify Solana x402 payments
#[derive(Parser, Debug)]
#[command(name = "x402-cli")]
#[command(about = "A CLI tool for simulating and testing Solana x402 payments")]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file (default: ~/.x402-cli/config.json)
    #[arg(long, global = true, env = "X402_CLI_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send SOL payment to a recipient address
    #[command(name = "pay")]
    Pay {
        /// Recipient Solana address
        #[arg(short, long)]
        recipient: String,

        /// Amount in SOL (e.g. 0.1)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Path to keypair JSON file (defaults to the configured wallet)
        #[arg(short, long)]
        from: Option<PathBuf>,

        /// Network: devnet, mainnet-beta, or testnet
        #[arg(short, long)]
        network: Option<String>,

        /// Override RPC URL for this invocation
        #[arg(long)]
        rpc_url: Option<String>,

        /// Skip transaction preflight checks
        #[arg(long)]
        skip_preflight: bool,
    },

    /// Verify a transaction signature and extract payment details
    #[command(name = "verify")]
    Verify {
        /// Transaction signature to verify
        signature: String,

        /// Network: devnet, mainnet-beta, or testnet
        #[arg(short, long)]
        network: Option<String>,

        /// Override RPC URL for this invocation
        #[arg(long)]
        rpc_url: Option<String>,

        /// Commitment for the transaction lookup: processed, confirmed or finalized
        #[arg(long, default_value = "confirmed")]
        commitment: String,
    },

    /// Initialize x402-cli configuration
    #[command(name = "init")]
    Init {
        /// Default network: devnet, mainnet-beta, or testnet
        #[arg(short, long)]
        network: Option<String>,

        /// Custom RPC URL
        #[arg(short, long)]
        rpc_url: Option<String>,

        /// Default wallet keypair path
        #[arg(short, long)]
        wallet: Option<String>,
    },

    /// Start a mock x402 API server for testing (coming soon)
    #[command(name = "mock-server")]
    MockServer {
        /// Port to run server on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,

        /// Network to use
        #[arg(short, long, default_value = "devnet")]
        network: String,
    },

    /// Verify a payment signature through an x402 facilitator (coming soon)
    #[command(name = "verify-stub")]
    VerifyStub {
        /// Transaction signature to verify
        signature: Option<String>,
    },
}
