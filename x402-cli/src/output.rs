//! Output formatting utilities for the x402 CLI

use colored::*;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use x402_client::units::{format_sol, truncate_address};
use x402_client::{CommitmentLevel, PaymentResult, VerificationResult, VerificationStatus};

use crate::config::CliConfig;

/// Format and print output based on the JSON flag
pub fn print_output(data: Value, json_format: bool) {
    if json_format {
        println!(
            "{}",
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        print_human_readable(&data);
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) {
    let data = serde_json::to_value(value).unwrap_or(Value::Null);
    print_output(data, true);
}

/// Print data in human-readable format
fn print_human_readable(data: &Value) {
    match data {
        Value::Object(map) => {
            for (key, value) in map {
                println!("{}: {}", key.cyan(), format_value(value));
            }
        }
        _ => println!("{}", format_value(data)),
    }
}

/// Format large numbers with underscores as thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(c);
    }
    out.chars().rev().collect()
}

/// Format a JSON value for human-readable output
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => format!(
            "[{}]",
            arr.iter().map(format_value).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

fn colored_status(status: VerificationStatus) -> ColoredString {
    match status {
        VerificationStatus::Confirmed | VerificationStatus::Finalized => {
            status.as_str().bold().green()
        }
        VerificationStatus::Pending => status.as_str().bold().yellow(),
        VerificationStatus::NotFound | VerificationStatus::Failed => status.as_str().bold().red(),
    }
}

/// Print a verification verdict
pub fn print_verification_info(result: &VerificationResult) {
    let header = if result.is_valid {
        "Payment Verified".bold().green()
    } else {
        "Verification Result".bold().yellow()
    };
    println!("{}", header);

    println!("  {}: {}", "Signature".cyan(), result.signature);
    println!("  {}: {}", "Network".cyan(), result.network);
    println!("  {}: {}", "Status".cyan(), colored_status(result.status));
    println!(
        "  {}: {}",
        "Valid".cyan(),
        if result.is_valid { "yes".green() } else { "no".red() }
    );

    if let Some(confirmation) = result.confirmation_status {
        if confirmation != CommitmentLevel::Processed {
            println!("  {}: {}", "Commitment".cyan(), confirmation);
        }
    }
    if let Some(slot) = result.slot {
        println!("  {}: {}", "Slot".cyan(), format_number(slot));
    }
    if let Some(block_time) = &result.block_time_iso {
        println!("  {}: {}", "Block Time".cyan(), block_time);
    }
    if let Some(lamports) = result.amount_lamports {
        println!(
            "  {}: {} SOL ({} lamports)",
            "Amount".cyan(),
            format_sol(lamports),
            format_number(lamports)
        );
    }
    if let Some(source) = &result.source {
        println!("  {}: {}", "From".cyan(), source);
    }
    if let Some(destination) = &result.destination {
        println!("  {}: {}", "To".cyan(), destination);
    }
    if let Some(fee) = result.fee_lamports {
        println!("  {}: {} lamports", "Fee".cyan(), format_number(fee));
    }
    if let Some(memo) = &result.memo {
        println!("  {}: {}", "Memo".cyan(), memo);
    }
    if let Some(error) = &result.error {
        println!("  {}: {}", "Error".cyan(), error.red());
    }

    println!();
    match result.status {
        VerificationStatus::Confirmed | VerificationStatus::Finalized => {
            println!("{}", result.message.green())
        }
        VerificationStatus::Pending => println!("{}", result.message.yellow()),
        VerificationStatus::NotFound | VerificationStatus::Failed => {
            println!("{}", result.message.red())
        }
    }

    for warning in &result.warnings {
        print_warning(warning);
    }
}

/// Print the outcome of a payment
pub fn print_payment_info(result: &PaymentResult) {
    if !result.is_success() {
        print_error(&format!(
            "Payment failed: {}",
            result.error.as_deref().unwrap_or("Unknown error")
        ));
        return;
    }

    print_success("Payment successful!");
    println!();
    println!("{}", "Transaction Details:".bold());
    println!("  {}: {}", "Recipient".cyan(), result.recipient);
    println!(
        "  {}: {} SOL ({} lamports)",
        "Amount".cyan(),
        result.amount,
        format_number(result.lamports)
    );
    println!("  {}: {}", "Network".cyan(), result.network);
    if let Some(signature) = &result.signature {
        println!("  {}: {}", "Signature".cyan(), signature);
    }

    if let Some(url) = result.explorer_url() {
        println!();
        println!("{}", "View on Solana Explorer:".bold());
        println!("  {}", url.underline());
    }
}

/// Spinner text while a payment is in flight
pub fn payment_progress_message(amount: f64, recipient: &str) -> String {
    format!(
        "Sending {} SOL to {}...",
        amount,
        truncate_address(recipient, 4, 4)
    )
}

/// Print a boxed title
pub fn print_banner(title: &str, subtitle: &str) {
    let inner = title.chars().count().max(subtitle.chars().count());
    let border = "─".repeat(inner + 6);

    println!();
    println!("{}", format!("┌{}┐", border).bright_cyan());
    for line in [title, subtitle] {
        println!(
            "{}",
            format!("│   {:<width$}   │", line, width = inner).bright_cyan()
        );
    }
    println!("{}", format!("└{}┘", border).bright_cyan());
    println!();
}

/// Print the configuration written by `init`
pub fn print_init_summary(path: &Path, config: &CliConfig) {
    print_success("Configuration saved successfully!");
    println!();
    println!("{}", "Configuration Summary".bold());

    let network = config.network.map(|n| n.as_str().to_uppercase());
    let path = path.display().to_string();
    let details = [
        ("Config File", Some(path.as_str())),
        ("Default Network", network.as_deref()),
        ("RPC URL", config.rpc_url.as_deref()),
        ("Default Wallet", config.default_wallet.as_deref()),
    ];

    for (label, value) in details {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            println!("  {} {}", format!("{:<16}:", label).dimmed(), value);
        }
    }

    println!();
    print_success("You are ready to send and verify x402 payments!");
}

/// Print error message
pub fn print_error(error: &str) {
    eprintln!("{}: {}", "Error".bold().red(), error);
}

/// Print warning message
pub fn print_warning(warning: &str) {
    eprintln!("{}: {}", "Warning".bold().yellow(), warning);
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{}: {}", "Success".bold().green(), message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{}: {}", "Info".bold().blue(), message);
}
