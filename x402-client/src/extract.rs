//! Payment facts carried by a parsed transaction
//!
//! A transaction with several system transfers reports the first one, not
//! the last, so the reported payment is the one the payer placed first.
//! Every extra transfer is counted in a warning.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use x402_rpc_client::{ParsedInstruction, ParsedTransaction, UiInstruction};

const MEMO_LOG_PREFIX: &str = "Program log: Memo";

fn memo_log_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Program log: Memo \(len \d+\):\s*(.*)$").expect("memo log pattern compiles")
    })
}

/// A native SOL transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub source: String,
    pub destination: String,
    pub lamports: u64,
}

/// Everything a verification reports about the payment itself
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentFacts {
    /// First system-program transfer, if any
    pub transfer: Option<Transfer>,
    pub memo: Option<String>,
    pub fee_lamports: Option<u64>,
    /// Partial or ambiguous data encountered while reading the transaction
    pub warnings: Vec<String>,
}

/// Read transfer, memo and fee out of a parsed transaction
///
/// When several transfers are present the first is reported and a warning
/// records how many were seen. Memos come from `spl-memo` instructions,
/// falling back to the memo program's log line.
pub fn extract_payment_facts(tx: &ParsedTransaction) -> PaymentFacts {
    let mut facts = PaymentFacts {
        fee_lamports: tx.meta.as_ref().map(|meta| meta.fee),
        ..PaymentFacts::default()
    };
    let mut transfers = 0usize;

    for instruction in &tx.transaction.message.instructions {
        let UiInstruction::Parsed(ix) = instruction else {
            continue;
        };

        match ix.program.as_str() {
            "system" if instruction_type(ix) == Some("transfer") => match parse_transfer(ix) {
                Some(transfer) => {
                    transfers += 1;
                    if facts.transfer.is_none() {
                        facts.transfer = Some(transfer);
                    }
                }
                None => facts
                    .warnings
                    .push("Skipped a transfer instruction with malformed fields".to_string()),
            },
            "spl-memo" if facts.memo.is_none() => {
                facts.memo = memo_from_instruction(&ix.parsed);
            }
            _ => {}
        }
    }

    if transfers > 1 {
        facts.warnings.push(format!(
            "Transaction contains {} transfer instructions; reporting the first",
            transfers
        ));
    }

    if facts.memo.is_none() {
        let logs = tx.meta.as_ref().and_then(|meta| meta.log_messages.as_deref());
        if let Some(line) = logs
            .into_iter()
            .flatten()
            .find(|line| line.starts_with(MEMO_LOG_PREFIX))
        {
            let (memo, well_formed) = memo_from_log(line);
            if !well_formed {
                facts
                    .warnings
                    .push(format!("Memo log line has an unexpected format: {}", line));
            }
            facts.memo = Some(memo);
        }
    }

    facts
}

fn instruction_type(ix: &ParsedInstruction) -> Option<&str> {
    ix.parsed.get("type").and_then(Value::as_str)
}

fn parse_transfer(ix: &ParsedInstruction) -> Option<Transfer> {
    let info = ix.parsed.get("info")?;
    Some(Transfer {
        source: info.get("source")?.as_str()?.to_string(),
        destination: info.get("destination")?.as_str()?.to_string(),
        lamports: info.get("lamports")?.as_u64()?,
    })
}

/// Nodes render memo instructions either as the bare memo string or as an
/// object carrying `info.memo`.
fn memo_from_instruction(parsed: &Value) -> Option<String> {
    match parsed {
        Value::String(memo) => Some(memo.clone()),
        other => other
            .pointer("/info/memo")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Returns the memo text and whether the line matched the expected layout
fn memo_from_log(line: &str) -> (String, bool) {
    match memo_log_pattern().captures(line) {
        Some(captures) => (captures[1].to_string(), true),
        None => (
            line.trim_start_matches(MEMO_LOG_PREFIX).trim().to_string(),
            false,
        ),
    }
}
