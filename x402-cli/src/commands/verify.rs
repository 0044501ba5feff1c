//! Verify command implementation

use std::str::FromStr;
use tracing::{debug, info_span};
use x402_client::{ClientError, CommitmentLevel, Verifier, VerifyOptions};

use crate::commands::create_rpc_client;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output;

/// Handle the verify command
pub async fn handle_verify_command(
    config: &CliConfig,
    signature: &str,
    network: Option<&str>,
    rpc_url: Option<&str>,
    commitment: &str,
    json_format: bool,
) -> Result<(), CliError> {
    let network = config.resolve_network(network)?;
    let commitment = CommitmentLevel::from_str(commitment).map_err(CliError::Validation)?;
    let rpc_url = config.resolve_rpc_url(rpc_url, network)?;
    let client = create_rpc_client(&rpc_url)?;

    let options = VerifyOptions {
        network,
        rpc_url: Some(rpc_url.to_string()),
        commitment,
    };
    let span = info_span!("verify", %network, %commitment);
    let result = Verifier::with_span(client, span)
        .verify(signature, &options)
        .await;

    if let Some(error) = &result.error {
        debug!("raw verification fault: {}", error);
    }

    if json_format {
        output::print_json(&result);
    } else {
        output::print_verification_info(&result);
    }

    match verify_exit_code(result.failure().as_ref()) {
        0 => Ok(()),
        exit_code => Err(CliError::Reported { exit_code }),
    }
}

/// 0 for a settled payment, 2 while pending, 1 otherwise
fn verify_exit_code(failure: Option<&ClientError>) -> i32 {
    match failure {
        None => 0,
        Some(ClientError::Pending(_)) => 2,
        Some(_) => 1,
    }
}
