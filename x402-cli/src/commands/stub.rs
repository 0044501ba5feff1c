//! Placeholder commands that are announced but not available yet

use serde_json::json;

use crate::error::CliError;
use crate::output;

/// Handle the mock-server command
pub fn handle_mock_server_command(port: u16, network: &str, json_format: bool) -> Result<(), CliError> {
    if json_format {
        output::print_output(
            json!({
                "command": "mock-server",
                "status": "not_implemented",
                "port": port,
                "network": network,
            }),
            true,
        );
        return Ok(());
    }

    output::print_warning("The mock-server command is not yet implemented.");
    output::print_info("This feature will provide a local API server for testing x402 payments.");
    output::print_info(&format!("Planned options: port={}, network={}", port, network));
    Ok(())
}

/// Handle the verify-stub command
pub fn handle_verify_stub_command(signature: Option<&str>, json_format: bool) -> Result<(), CliError> {
    if json_format {
        output::print_output(
            json!({
                "command": "verify-stub",
                "status": "not_implemented",
                "signature": signature,
            }),
            true,
        );
        return Ok(());
    }

    output::print_warning("The verify-stub command is not yet implemented.");
    output::print_info("This feature will verify x402 payment signatures through a facilitator.");
    if let Some(signature) = signature {
        output::print_info(&format!("Signature: {}", signature));
    }
    Ok(())
}
