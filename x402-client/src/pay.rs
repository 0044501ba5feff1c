//! Native SOL payments

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Signer, read_keypair_file};
use solana_sdk::transaction::Transaction;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{Instrument, Span, debug, info};

use crate::error::ClientError;
use crate::gateway::RpcGateway;
use crate::network::Network;
use crate::units::{format_sol, sol_to_lamports};

/// Lamports kept aside for the transaction fee when checking the balance
pub const FEE_RESERVE_LAMPORTS: u64 = 5000;

/// A payment to send
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Base58 recipient address
    pub recipient: String,
    pub amount_sol: f64,
    /// Solana JSON keypair file of the payer
    pub keypair_path: Option<PathBuf>,
    pub network: Network,
    pub skip_preflight: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failed,
}

/// Outcome of a payment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub recipient: String,
    /// Requested amount in SOL
    pub amount: f64,
    /// Amount actually transferred, in lamports
    pub lamports: u64,
    pub network: Network,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentResult {
    pub fn is_success(&self) -> bool {
        self.status == PaymentStatus::Success
    }

    /// Explorer link for the submitted transaction
    pub fn explorer_url(&self) -> Option<String> {
        self.signature
            .as_deref()
            .map(|signature| self.network.explorer_tx_url(signature))
    }
}

/// Builds, signs and submits transfers
#[derive(Debug)]
pub struct PaymentSubmitter<G> {
    gateway: G,
    span: Span,
}

impl<G: RpcGateway> PaymentSubmitter<G> {
    pub fn new(gateway: G) -> Self {
        Self::with_span(gateway, Span::none())
    }

    pub fn with_span(gateway: G, span: Span) -> Self {
        Self { gateway, span }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Send the payment; every failure is folded into the result
    pub async fn pay(&self, request: &PaymentRequest) -> PaymentResult {
        let lamports = sol_to_lamports(request.amount_sol);
        let outcome = self
            .submit(request, lamports)
            .instrument(self.span.clone())
            .await;

        let (status, signature, error) = match outcome {
            Ok(signature) => (PaymentStatus::Success, Some(signature), None),
            Err(err) => {
                self.span.in_scope(|| debug!("payment failed: {}", err));
                (PaymentStatus::Failed, None, Some(payment_error_text(&err)))
            }
        };

        PaymentResult {
            status,
            signature,
            recipient: request.recipient.clone(),
            amount: request.amount_sol,
            lamports,
            network: request.network,
            error,
        }
    }

    async fn submit(&self, request: &PaymentRequest, lamports: u64) -> Result<String, ClientError> {
        let recipient = Pubkey::from_str(&request.recipient).map_err(|_| {
            ClientError::Validation(format!("Invalid recipient address: {}", request.recipient))
        })?;

        if !request.amount_sol.is_finite() || request.amount_sol <= 0.0 {
            return Err(ClientError::Validation(
                "Invalid amount. Must be a positive number.".to_string(),
            ));
        }
        if lamports == 0 {
            return Err(ClientError::Validation(format!(
                "Amount {} SOL is below the smallest transferable unit (1 lamport)",
                request.amount_sol
            )));
        }

        let keypair_path = request.keypair_path.as_ref().ok_or_else(|| {
            ClientError::Validation(
                "Wallet path required. Use --from <path> to specify keypair file.".to_string(),
            )
        })?;
        let payer = read_keypair_file(keypair_path).map_err(|e| {
            ClientError::Validation(format!(
                "Failed to load keypair from {}: {}",
                keypair_path.display(),
                e
            ))
        })?;

        let balance = self.gateway.get_balance(&payer.pubkey()).await?;
        let required = lamports.saturating_add(FEE_RESERVE_LAMPORTS);
        debug!(
            "payer {} balance {} lamports, required {}",
            payer.pubkey(),
            balance,
            required
        );
        if balance < required {
            return Err(ClientError::InsufficientFunds(format!(
                "Insufficient balance. Required: {} SOL, Available: {} SOL",
                format_sol(required),
                format_sol(balance)
            )));
        }

        let (blockhash, last_valid_block_height) = self.gateway.get_latest_blockhash().await?;

        #[allow(deprecated)]
        let instruction =
            solana_sdk::system_instruction::transfer(&payer.pubkey(), &recipient, lamports);
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&payer.pubkey()),
            &[&payer],
            blockhash,
        );

        info!(
            "sending {} lamports to {} on {}",
            lamports, recipient, request.network
        );
        let signature = self
            .gateway
            .send_and_confirm(&transaction, request.skip_preflight, last_valid_block_height)
            .await?;
        debug!("transaction signature: {}", signature);
        Ok(signature)
    }
}

/// Input and balance messages are shown as-is; other categories keep their prefix
fn payment_error_text(err: &ClientError) -> String {
    match err {
        ClientError::Validation(message) | ClientError::InsufficientFunds(message) => {
            message.clone()
        }
        other => other.to_string(),
    }
}
