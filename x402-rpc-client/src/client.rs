//! Main client implementation

use std::time::Duration;
use url::Url;

use crate::error::{Result, ValidationError};
use crate::http::HttpClient;
use crate::types::{
    CommitmentLevel, LatestBlockhash, ParsedTransaction, SendTransactionConfig, SignatureStatus,
};

/// Configuration for the RPC client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// HTTP endpoint for RPC calls
    pub http_endpoint: Url,
    /// Request timeout
    pub timeout: Duration,
    /// How long to wait for a submitted transaction to be confirmed
    pub confirm_timeout: Duration,
    /// Maximum number of idle pooled connections
    pub max_connections: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            http_endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: Duration::from_secs(30),
            confirm_timeout: Duration::from_secs(60),
            max_connections: 16,
        }
    }
}

const DEFAULT_ENDPOINT: &str = "https://api.devnet.solana.com";

/// Builder for creating a configured RPC client
#[derive(Debug)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Set the HTTP endpoint
    pub fn http_endpoint(mut self, url: Url) -> Self {
        self.config.http_endpoint = url;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set how long to wait for transaction confirmation
    pub fn confirm_timeout(mut self, timeout: Duration) -> Self {
        self.config.confirm_timeout = timeout;
        self
    }

    /// Set the maximum number of idle pooled connections
    pub fn max_connections(mut self, max: usize) -> Self {
        self.config.max_connections = max;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<Client> {
        Client::new(self.config)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main Solana RPC client
#[derive(Clone, Debug)]
pub struct Client {
    config: ClientConfig,
    http_client: HttpClient,
}

impl Client {
    /// Create a new client with the given configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let scheme = config.http_endpoint.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ValidationError::InvalidConfig(format!(
                "unsupported scheme '{}'; expected http or https",
                scheme
            ))
            .into());
        }

        tracing::debug!("Creating new client with config: {:?}", config);
        let http_client = HttpClient::new(config.clone())?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Create a client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http_client
    }

    /// Get the client configuration
    pub fn get_config(&self) -> &ClientConfig {
        &self.config
    }
}

// Re-export HTTP methods for convenience
impl Client {
    /// Get the status of one signature, searching the node's full history
    pub async fn get_signature_status(&self, signature: &str) -> Result<Option<SignatureStatus>> {
        self.http_client.get_signature_status(signature).await
    }

    /// Get statuses for a batch of signatures
    pub async fn get_signature_statuses(
        &self,
        signatures: &[&str],
        search_transaction_history: bool,
    ) -> Result<Vec<Option<SignatureStatus>>> {
        self.http_client
            .get_signature_statuses(signatures, search_transaction_history)
            .await
    }

    /// Get a transaction in `jsonParsed` encoding
    pub async fn get_parsed_transaction(
        &self,
        signature: &str,
        commitment: Option<CommitmentLevel>,
    ) -> Result<Option<ParsedTransaction>> {
        self.http_client
            .get_parsed_transaction(signature, commitment)
            .await
    }

    /// Get account balance in lamports
    pub async fn get_balance(&self, pubkey: &str) -> Result<u64> {
        self.http_client.get_balance(pubkey).await
    }

    /// Get the latest blockhash and its expiry height
    pub async fn get_latest_blockhash(&self) -> Result<LatestBlockhash> {
        self.http_client.get_latest_blockhash().await
    }

    /// Get current block height
    pub async fn get_block_height(&self, commitment: CommitmentLevel) -> Result<u64> {
        self.http_client.get_block_height(commitment).await
    }

    /// Send a serialized transaction
    pub async fn send_transaction(
        &self,
        transaction: &[u8],
        config: &SendTransactionConfig,
    ) -> Result<String> {
        self.http_client.send_transaction(transaction, config).await
    }

    /// Send a transaction and wait until it reaches `confirmed`
    pub async fn send_and_confirm_transaction(
        &self,
        transaction: &[u8],
        config: &SendTransactionConfig,
        last_valid_block_height: u64,
    ) -> Result<String> {
        self.http_client
            .send_and_confirm_transaction(transaction, config, last_valid_block_height)
            .await
    }
}
