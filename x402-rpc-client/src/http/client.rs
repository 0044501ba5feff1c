//! HTTP client implementation

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::client::ClientConfig;
use crate::error::{
    HttpError, Result, RpcClientError, SerializationError, TransactionError, ValidationError,
};
use crate::types::{
    CommitmentConfig, CommitmentLevel, ContextResponse, GetTransactionConfig, LatestBlockhash,
    ParsedTransaction, SendTransactionConfig, SignatureStatus, SignatureStatusConfig,
};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// JSON-RPC request structure
#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

/// JSON-RPC response structure
///
/// `result` keeps an explicit JSON `null` as `Some(Value::Null)` so that
/// methods returning nullable results can be told apart from a missing field.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default, deserialize_with = "deserialize_present")]
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    data: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// HTTP client for RPC requests
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
    request_id: Arc<AtomicU64>,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_connections)
            .build()
            .map_err(HttpError::RequestBuilder)?;

        Ok(Self {
            client,
            config,
            request_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Get the next request ID
    fn next_request_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Send a JSON-RPC request
    async fn send_request<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_request_id(),
            method: method.to_string(),
            params,
        };
        tracing::trace!("request: {:?}", request);

        let response = self
            .client
            .post(self.config.http_endpoint.as_str())
            .json(&request)
            .send()
            .await
            .map_err(HttpError::RequestBuilder)?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::RequestFailed {
                status: status.as_u16(),
                message: format!("HTTP {} error", status),
            }
            .into());
        }

        let body = response.text().await.map_err(HttpError::ResponseBody)?;

        tracing::trace!("response: {:?}", body);

        let rpc_response: JsonRpcResponse =
            serde_json::from_str(&body).map_err(|e| SerializationError::JsonDeserialize {
                source: e,
                data: body.clone(),
            })?;

        if let Some(error) = rpc_response.error {
            return Err(HttpError::from_rpc_error(error.code, error.message, error.data).into());
        }

        let result = rpc_response.result.ok_or(HttpError::MissingResult)?;
        serde_json::from_value(result).map_err(|e| {
            SerializationError::JsonDeserialize {
                source: e,
                data: body,
            }
            .into()
        })
    }

    /// Get statuses for a batch of signatures
    pub async fn get_signature_statuses(
        &self,
        signatures: &[&str],
        search_transaction_history: bool,
    ) -> Result<Vec<Option<SignatureStatus>>> {
        let config = SignatureStatusConfig {
            search_transaction_history,
        };
        let params = json!([signatures, config]);

        let response: ContextResponse<Vec<Option<SignatureStatus>>> = self
            .send_request("getSignatureStatuses", Some(params))
            .await?;
        Ok(response.value)
    }

    /// Get the status of one signature, searching the node's full history
    pub async fn get_signature_status(&self, signature: &str) -> Result<Option<SignatureStatus>> {
        let statuses = self.get_signature_statuses(&[signature], true).await?;
        Ok(statuses.into_iter().next().flatten())
    }

    /// Get a transaction in `jsonParsed` encoding
    ///
    /// Returns `None` when the node has no record of the signature at the
    /// requested commitment.
    pub async fn get_parsed_transaction(
        &self,
        signature: &str,
        commitment: Option<CommitmentLevel>,
    ) -> Result<Option<ParsedTransaction>> {
        let config = GetTransactionConfig::parsed(commitment);
        let params = json!([signature, config]);

        let response: Option<ParsedTransaction> =
            self.send_request("getTransaction", Some(params)).await?;
        Ok(response)
    }

    /// Get account balance in lamports
    pub async fn get_balance(&self, pubkey: &str) -> Result<u64> {
        let config = CommitmentConfig {
            commitment: Some(CommitmentLevel::Confirmed),
        };
        let params = json!([pubkey, config]);

        let response: ContextResponse<u64> = self.send_request("getBalance", Some(params)).await?;
        Ok(response.value)
    }

    /// Get the latest blockhash and its expiry height
    pub async fn get_latest_blockhash(&self) -> Result<LatestBlockhash> {
        let config = CommitmentConfig {
            commitment: Some(CommitmentLevel::Confirmed),
        };
        let params = json!([config]);

        let response: ContextResponse<LatestBlockhash> = self
            .send_request("getLatestBlockhash", Some(params))
            .await?;
        Ok(response.value)
    }

    /// Get current block height
    pub async fn get_block_height(&self, commitment: CommitmentLevel) -> Result<u64> {
        let config = CommitmentConfig {
            commitment: Some(commitment),
        };
        let params = json!([config]);
        self.send_request("getBlockHeight", Some(params)).await
    }

    /// Send a serialized transaction, returning its signature
    pub async fn send_transaction(
        &self,
        transaction: &[u8],
        config: &SendTransactionConfig,
    ) -> Result<String> {
        if transaction.is_empty() {
            return Err(ValidationError::InvalidTransaction(
                "transaction bytes are empty".to_string(),
            )
            .into());
        }

        let encoded = general_purpose::STANDARD.encode(transaction);
        let params = json!([encoded, config]);

        let signature: String = self.send_request("sendTransaction", Some(params)).await?;
        if signature.is_empty() {
            return Err(ValidationError::InvalidSignature(
                "node returned an empty signature".to_string(),
            )
            .into());
        }
        Ok(signature)
    }

    /// Wait until a signature reaches the given commitment
    ///
    /// Polls the signature status until the commitment is reached, the node
    /// reports an execution error, the blockhash expires, or the configured
    /// confirmation timeout elapses.
    pub async fn confirm_transaction(
        &self,
        signature: &str,
        commitment: CommitmentLevel,
        last_valid_block_height: u64,
    ) -> Result<SignatureStatus> {
        let timeout_duration = self.config.confirm_timeout;

        let poll_result = timeout(timeout_duration, async {
            loop {
                let statuses = self.get_signature_statuses(&[signature], false).await?;
                if let Some(status) = statuses.into_iter().next().flatten() {
                    if let Some(err) = status.err.clone() {
                        return Err(TransactionError::Failed {
                            signature: signature.to_string(),
                            err,
                        }
                        .into());
                    }
                    if status.satisfies_commitment(commitment) {
                        return Ok(status);
                    }
                    tracing::debug!(
                        "signature {} at {:?}, waiting for {}",
                        signature,
                        status.confirmation_status,
                        commitment
                    );
                }

                let block_height = self.get_block_height(CommitmentLevel::Confirmed).await?;
                if block_height > last_valid_block_height {
                    return Err(TransactionError::BlockhashExpired {
                        signature: signature.to_string(),
                        last_valid_block_height,
                    }
                    .into());
                }

                sleep(POLL_INTERVAL).await;
            }
        })
        .await;

        match poll_result {
            Ok(result) => result,
            Err(_) => Err(RpcClientError::timeout(timeout_duration)),
        }
    }

    /// Send a transaction and wait until it reaches `confirmed`
    pub async fn send_and_confirm_transaction(
        &self,
        transaction: &[u8],
        config: &SendTransactionConfig,
        last_valid_block_height: u64,
    ) -> Result<String> {
        let signature = self.send_transaction(transaction, config).await?;
        tracing::debug!("submitted transaction {}", signature);

        self.confirm_transaction(&signature, CommitmentLevel::Confirmed, last_valid_block_height)
            .await?;
        Ok(signature)
    }
}
