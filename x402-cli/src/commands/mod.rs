//! Command implementations for the x402 CLI

pub mod init;
pub mod pay;
pub mod stub;
pub mod verify;

use url::Url;
use x402_rpc_client::Client;

use crate::error::CliError;

/// Build an RPC client for `rpc_url`
pub(crate) fn create_rpc_client(rpc_url: &Url) -> Result<Client, CliError> {
    Client::builder()
        .http_endpoint(rpc_url.clone())
        .build()
        .map_err(|e| e.into())
}
