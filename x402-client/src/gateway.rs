//! Node access used by the verifier and the payment submitter

use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::Transaction;
use std::future::Future;
use std::str::FromStr;
use x402_rpc_client::error::ValidationError;
use x402_rpc_client::{
    Client, CommitmentLevel, ParsedTransaction, RpcClientError, SendTransactionConfig,
    SignatureStatus,
};

/// Result of a gateway call
pub type GatewayResult<T> = std::result::Result<T, RpcClientError>;

/// The RPC calls the payment and verification flows depend on
///
/// Implemented for the HTTP [`Client`]; tests substitute in-memory fakes.
pub trait RpcGateway: Send + Sync {
    /// Status of a signature, searching the node's full history
    fn get_signature_status(
        &self,
        signature: &str,
    ) -> impl Future<Output = GatewayResult<Option<SignatureStatus>>> + Send;

    /// Transaction body in `jsonParsed` encoding
    fn get_parsed_transaction(
        &self,
        signature: &str,
        commitment: Option<CommitmentLevel>,
    ) -> impl Future<Output = GatewayResult<Option<ParsedTransaction>>> + Send;

    /// Balance of an account in lamports
    fn get_balance(&self, pubkey: &Pubkey) -> impl Future<Output = GatewayResult<u64>> + Send;

    /// Latest blockhash together with its last valid block height
    fn get_latest_blockhash(&self) -> impl Future<Output = GatewayResult<(Hash, u64)>> + Send;

    /// Submit a signed transaction and wait for `confirmed` commitment
    fn send_and_confirm(
        &self,
        transaction: &Transaction,
        skip_preflight: bool,
        last_valid_block_height: u64,
    ) -> impl Future<Output = GatewayResult<String>> + Send;
}

impl RpcGateway for Client {
    async fn get_signature_status(&self, signature: &str) -> GatewayResult<Option<SignatureStatus>> {
        self.http().get_signature_status(signature).await
    }

    async fn get_parsed_transaction(
        &self,
        signature: &str,
        commitment: Option<CommitmentLevel>,
    ) -> GatewayResult<Option<ParsedTransaction>> {
        self.http().get_parsed_transaction(signature, commitment).await
    }

    async fn get_balance(&self, pubkey: &Pubkey) -> GatewayResult<u64> {
        self.http().get_balance(&pubkey.to_string()).await
    }

    async fn get_latest_blockhash(&self) -> GatewayResult<(Hash, u64)> {
        let latest = self.http().get_latest_blockhash().await?;
        let hash = Hash::from_str(&latest.blockhash).map_err(|e| {
            ValidationError::InvalidTransaction(format!(
                "node returned invalid blockhash {}: {}",
                latest.blockhash, e
            ))
        })?;
        Ok((hash, latest.last_valid_block_height))
    }

    async fn send_and_confirm(
        &self,
        transaction: &Transaction,
        skip_preflight: bool,
        last_valid_block_height: u64,
    ) -> GatewayResult<String> {
        let wire = bincode::serialize(transaction)
            .map_err(|e| ValidationError::InvalidTransaction(e.to_string()))?;
        let config = SendTransactionConfig {
            skip_preflight,
            ..SendTransactionConfig::default()
        };
        self.http()
            .send_and_confirm_transaction(&wire, &config, last_valid_block_height)
            .await
    }
}
