//! Transaction verification
//!
//! A verification reconciles two node lookups that can disagree while the
//! cluster catches up: the signature status (cheap, searched through the full
//! history) and the parsed transaction (detailed, but subject to pruning and
//! commitment lag). The status decides whether the transaction exists and how
//! deep it is; the parsed body, when available, supplies the payment facts.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{Instrument, Span, debug};
use url::Url;
use x402_rpc_client::{
    Client, CommitmentLevel, ParsedTransaction, RpcClientError, SignatureStatus,
};

use crate::error::ClientError;
use crate::extract::extract_payment_facts;
use crate::gateway::RpcGateway;
use crate::network::Network;
use crate::units::lamports_to_sol;

pub const MSG_NOT_FOUND: &str =
    "Signature not found. It may be incorrect or pruned from RPC history.";
pub const MSG_STATUS_FAILED: &str = "Transaction execution failed.";
pub const MSG_PENDING: &str = "Transaction is pending confirmation. Try again shortly.";
pub const MSG_DETAILS_UNAVAILABLE: &str =
    "Transaction confirmed but detailed data is unavailable (RPC history may be trimmed).";
pub const MSG_EXECUTION_FAILED: &str = "Transaction failed during execution.";
pub const MSG_VERIFIED: &str = "Transaction verified successfully.";
pub const MSG_TRANSPORT_FAILED: &str = "Failed to verify transaction.";

/// Lifecycle position of a transaction as far as the node can tell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    NotFound,
    Pending,
    Confirmed,
    Finalized,
    Failed,
}

impl VerificationStatus {
    /// Map the node's confirmation depth; unknown depth counts as pending
    pub fn from_confirmation(confirmation: Option<CommitmentLevel>) -> Self {
        match confirmation {
            Some(CommitmentLevel::Confirmed) => VerificationStatus::Confirmed,
            Some(CommitmentLevel::Finalized) => VerificationStatus::Finalized,
            Some(CommitmentLevel::Processed) | None => VerificationStatus::Pending,
        }
    }

    /// Whether the cluster has voted on the transaction
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            VerificationStatus::Confirmed | VerificationStatus::Finalized
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::NotFound => "not_found",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Confirmed => "confirmed",
            VerificationStatus::Finalized => "finalized",
            VerificationStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one verification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_valid: bool,
    pub signature: String,
    pub network: Network,
    pub status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<CommitmentLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_time_iso: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_lamports: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_sol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_lamports: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Set when the node could not be queried at all
    #[serde(skip)]
    pub transport_failure: bool,
}

impl VerificationResult {
    fn new(signature: &str, network: Network, status: VerificationStatus, message: &str) -> Self {
        Self {
            is_valid: false,
            signature: signature.to_string(),
            network,
            status,
            confirmation_status: None,
            slot: None,
            block_time: None,
            block_time_iso: None,
            amount_lamports: None,
            amount_sol: None,
            fee_lamports: None,
            source: None,
            destination: None,
            memo: None,
            error: None,
            message: message.to_string(),
            warnings: Vec::new(),
            transport_failure: false,
        }
    }

    fn transport_failed(signature: &str, network: Network, err: &RpcClientError) -> Self {
        let mut result = Self::new(
            signature,
            network,
            VerificationStatus::Failed,
            MSG_TRANSPORT_FAILED,
        );
        result.error = Some(err.to_string());
        result.transport_failure = true;
        result
    }

    /// Why the transaction cannot be treated as a settled payment
    ///
    /// `None` for confirmed and finalized transactions.
    pub fn failure(&self) -> Option<ClientError> {
        let detail = || self.error.clone().unwrap_or_else(|| self.message.clone());
        match self.status {
            VerificationStatus::Confirmed | VerificationStatus::Finalized => None,
            VerificationStatus::NotFound => Some(ClientError::NotFound(self.message.clone())),
            VerificationStatus::Pending => Some(ClientError::Pending(self.message.clone())),
            VerificationStatus::Failed if self.transport_failure => {
                Some(ClientError::Transport(detail()))
            }
            VerificationStatus::Failed => Some(ClientError::Execution(detail())),
        }
    }
}

/// Parameters of a verification
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub network: Network,
    /// Overrides the network's public endpoint
    pub rpc_url: Option<String>,
    /// Commitment used for the parsed transaction lookup
    pub commitment: CommitmentLevel,
}

impl VerifyOptions {
    /// Endpoint the verification talks to
    pub fn endpoint(&self) -> &str {
        self.rpc_url.as_deref().unwrap_or(self.network.rpc_url())
    }
}

/// Signature status decoded into the cases the verifier distinguishes
#[derive(Debug, Clone, PartialEq)]
enum StatusLookup {
    Missing,
    Failed {
        err: Value,
        confirmation: Option<CommitmentLevel>,
        slot: Option<u64>,
    },
    Landed {
        confirmation: Option<CommitmentLevel>,
        slot: Option<u64>,
    },
}

impl From<Option<SignatureStatus>> for StatusLookup {
    fn from(status: Option<SignatureStatus>) -> Self {
        match status {
            None => StatusLookup::Missing,
            Some(SignatureStatus {
                err: Some(err),
                confirmation_status,
                slot,
                ..
            }) if !err.is_null() => StatusLookup::Failed {
                err,
                confirmation: confirmation_status,
                slot,
            },
            Some(status) => StatusLookup::Landed {
                confirmation: status.confirmation_status,
                slot: status.slot,
            },
        }
    }
}

/// Parsed transaction decoded into the cases the verifier distinguishes
#[derive(Debug, Clone)]
enum TransactionLookup {
    Unavailable,
    Failed { slot: u64, err: Value },
    Succeeded(Box<ParsedTransaction>),
}

impl From<Option<ParsedTransaction>> for TransactionLookup {
    fn from(tx: Option<ParsedTransaction>) -> Self {
        let Some(tx) = tx else {
            return TransactionLookup::Unavailable;
        };
        let err = tx.meta.as_ref().and_then(|meta| meta.err.clone());
        match err {
            Some(err) if !err.is_null() => TransactionLookup::Failed { slot: tx.slot, err },
            _ => TransactionLookup::Succeeded(Box::new(tx)),
        }
    }
}

/// Node errors arrive either as a bare string or as a JSON object
fn describe_error(err: &Value) -> String {
    match err {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn iso_timestamp(block_time: i64) -> Option<String> {
    DateTime::from_timestamp(block_time, 0)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Derives a verdict for a signature from what a node reports
#[derive(Debug)]
pub struct Verifier<G> {
    gateway: G,
    span: Span,
}

impl<G: RpcGateway> Verifier<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_span(gateway, Span::none())
    }

    /// Verifier whose lookups are recorded under `span`
    pub fn with_span(gateway: G, span: Span) -> Self {
        Self { gateway, span }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Verify `signature`; every failure is folded into the result
    pub async fn verify(&self, signature: &str, options: &VerifyOptions) -> VerificationResult {
        self.run(signature, options)
            .instrument(self.span.clone())
            .await
    }

    async fn run(&self, signature: &str, options: &VerifyOptions) -> VerificationResult {
        let network = options.network;

        let status = match self.gateway.get_signature_status(signature).await {
            Ok(status) => StatusLookup::from(status),
            Err(err) => {
                debug!("signature status lookup failed: {}", err);
                return VerificationResult::transport_failed(signature, network, &err);
            }
        };

        let (confirmation, slot) = match status {
            StatusLookup::Missing => {
                debug!("no status for {}", signature);
                return VerificationResult::new(
                    signature,
                    network,
                    VerificationStatus::NotFound,
                    MSG_NOT_FOUND,
                );
            }
            StatusLookup::Failed {
                err,
                confirmation,
                slot,
            } => {
                debug!("status for {} carries error {}", signature, err);
                let mut result = VerificationResult::new(
                    signature,
                    network,
                    VerificationStatus::Failed,
                    MSG_STATUS_FAILED,
                );
                result.confirmation_status = confirmation;
                result.slot = slot;
                result.error = Some(describe_error(&err));
                return result;
            }
            StatusLookup::Landed { confirmation, slot } => (confirmation, slot),
        };

        let derived = VerificationStatus::from_confirmation(confirmation);
        let reported_depth = confirmation.filter(|level| *level != CommitmentLevel::Processed);
        debug!(
            "status for {}: {:?} at slot {:?}, derived {}",
            signature, confirmation, slot, derived
        );

        let lookup = match self
            .gateway
            .get_parsed_transaction(signature, Some(options.commitment))
            .await
        {
            Ok(tx) => TransactionLookup::from(tx),
            Err(err) => {
                debug!("parsed transaction lookup failed: {}", err);
                return VerificationResult::transport_failed(signature, network, &err);
            }
        };

        match lookup {
            TransactionLookup::Unavailable => {
                debug!("no parsed transaction for {} at {}", signature, options.commitment);
                let message = if derived.is_settled() {
                    MSG_DETAILS_UNAVAILABLE
                } else {
                    MSG_PENDING
                };
                let mut result = VerificationResult::new(signature, network, derived, message);
                result.is_valid = derived.is_settled();
                result.confirmation_status = reported_depth;
                result.slot = slot;
                result
            }
            TransactionLookup::Failed { slot, err } => {
                debug!("parsed transaction for {} failed: {}", signature, err);
                let mut result = VerificationResult::new(
                    signature,
                    network,
                    VerificationStatus::Failed,
                    MSG_EXECUTION_FAILED,
                );
                result.confirmation_status = reported_depth;
                result.slot = Some(slot);
                result.error = Some(describe_error(&err));
                result
            }
            TransactionLookup::Succeeded(tx) => {
                let message = if derived.is_settled() {
                    MSG_VERIFIED
                } else {
                    MSG_PENDING
                };
                let mut result = VerificationResult::new(signature, network, derived, message);
                result.is_valid = derived.is_settled();
                result.confirmation_status = reported_depth;
                result.slot = Some(tx.slot);
                result.block_time = tx.block_time;
                result.block_time_iso = tx.block_time.and_then(iso_timestamp);

                let facts = extract_payment_facts(&tx);
                if let Some(transfer) = facts.transfer {
                    result.amount_lamports = Some(transfer.lamports);
                    result.amount_sol = Some(lamports_to_sol(transfer.lamports));
                    result.source = Some(transfer.source);
                    result.destination = Some(transfer.destination);
                }
                result.memo = facts.memo;
                result.fee_lamports = facts.fee_lamports;
                result.warnings = facts.warnings;
                if tx.meta.is_none() {
                    result
                        .warnings
                        .push("Transaction metadata is unavailable".to_string());
                }
                for warning in &result.warnings {
                    debug!("{}: {}", signature, warning);
                }
                result
            }
        }
    }
}

/// Verify against the endpoint named by `options`
///
/// Builds an HTTP client for the endpoint and runs a [`Verifier`] under the
/// caller's current span.
pub async fn verify_signature(signature: &str, options: &VerifyOptions) -> VerificationResult {
    let client = Url::parse(options.endpoint())
        .map_err(|e| {
            RpcClientError::Validation(x402_rpc_client::error::ValidationError::InvalidConfig(
                format!("invalid RPC URL {}: {}", options.endpoint(), e),
            ))
        })
        .and_then(|url| Client::builder().http_endpoint(url).build());

    match client {
        Ok(client) => {
            Verifier::with_span(client, Span::current())
                .verify(signature, options)
                .await
        }
        Err(err) => VerificationResult::transport_failed(signature, options.network, &err),
    }
}
