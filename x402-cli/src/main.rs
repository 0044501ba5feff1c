//! x402-cli - Command-line tool for Solana x402 payments
//!
//! Sends native SOL payments and verifies transaction signatures against a
//! Solana RPC node.

use anyhow::Result;

use clap::Parser;
use serde_json::{Value, json};
use std::process;

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use config::ConfigStore;
use error::CliError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const VERBOSE_FILTER: &str = "warn,x402_cli=debug,x402_client=debug,x402_rpc_client=debug";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli).await {
        match (&err, cli.json) {
            (CliError::Reported { .. }, _) => {
                // Command already emitted user-facing output
            }
            (_, true) => output::print_output(format_error_json(&err), true),
            (_, false) => output::print_error(&err.to_string()),
        }
        process::exit(err.exit_code());
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` takes precedence over `--verbose`
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE_FILTER } else { "warn" }));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let store = ConfigStore::locate(cli.config.clone())?;

    match &cli.command {
        Commands::Pay {
            recipient,
            amount,
            from,
            network,
            rpc_url,
            skip_preflight,
        } => {
            let config = store.load().await;
            let args = commands::pay::PayArgs {
                recipient: recipient.clone(),
                amount: amount.clone(),
                from: from.clone(),
                network: network.clone(),
                rpc_url: rpc_url.clone(),
                skip_preflight: *skip_preflight,
            };
            commands::pay::handle_pay_command(&config, args, cli.json).await
        }
        Commands::Verify {
            signature,
            network,
            rpc_url,
            commitment,
        } => {
            let config = store.load().await;
            commands::verify::handle_verify_command(
                &config,
                signature,
                network.as_deref(),
                rpc_url.as_deref(),
                commitment,
                cli.json,
            )
            .await
        }
        Commands::Init {
            network,
            rpc_url,
            wallet,
        } => {
            commands::init::handle_init_command(
                &store,
                network.as_deref(),
                rpc_url.as_deref(),
                wallet.as_deref(),
                cli.json,
            )
            .await
        }
        Commands::MockServer { port, network } => {
            commands::stub::handle_mock_server_command(*port, network, cli.json)
        }
        Commands::VerifyStub { signature } => {
            commands::stub::handle_verify_stub_command(signature.as_deref(), cli.json)
        }
    }
}

fn format_error_json(err: &CliError) -> Value {
    let error_type = match err {
        CliError::Config(_) => "config",
        CliError::Rpc(_) => "rpc",
        CliError::Validation(_) => "validation",
        CliError::Io(_) => "io",
        CliError::Generic { .. } | CliError::Reported { .. } => "generic",
    };

    json!({
        "error": {
            "type": error_type,
            "message": err.to_string(),
        }
    })
}
