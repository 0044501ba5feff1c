//! Pay command implementation

use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info_span;
use x402_client::{PaymentRequest, PaymentSubmitter};

use crate::commands::create_rpc_client;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::output;

/// Arguments of the pay command
#[derive(Debug, Clone)]
pub struct PayArgs {
    pub recipient: String,
    pub amount: String,
    pub from: Option<PathBuf>,
    pub network: Option<String>,
    pub rpc_url: Option<String>,
    pub skip_preflight: bool,
}

/// Handle the pay command
pub async fn handle_pay_command(
    config: &CliConfig,
    args: PayArgs,
    json_format: bool,
) -> Result<(), CliError> {
    let network = config.resolve_network(args.network.as_deref())?;
    let amount_sol = parse_amount(&args.amount)?;
    let rpc_url = config.resolve_rpc_url(args.rpc_url.as_deref(), network)?;
    let client = create_rpc_client(&rpc_url)?;

    let request = PaymentRequest {
        keypair_path: config.resolve_wallet(args.from),
        recipient: args.recipient,
        amount_sol,
        network,
        skip_preflight: args.skip_preflight,
    };

    let spinner = if json_format {
        None
    } else {
        Some(start_spinner(output::payment_progress_message(
            amount_sol,
            &request.recipient,
        ))?)
    };

    let span = info_span!("pay", %network, recipient = %request.recipient);
    let result = PaymentSubmitter::with_span(client, span)
        .pay(&request)
        .await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if json_format {
        output::print_json(&result);
    } else {
        output::print_payment_info(&result);
    }

    if result.is_success() {
        Ok(())
    } else {
        Err(CliError::Reported { exit_code: 1 })
    }
}

/// Parse the SOL amount given on the command line
fn parse_amount(raw: &str) -> Result<f64, CliError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .ok_or_else(|| {
            CliError::Validation("Invalid amount. Must be a positive number.".to_string())
        })
}

fn start_spinner(message: String) -> Result<ProgressBar, CliError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .map_err(|e| CliError::Generic {
                message: format!("Invalid progress template: {}", e),
            })?,
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}
