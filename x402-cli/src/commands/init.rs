//! Init command implementation

use serde_json::json;
use std::str::FromStr;
use x402_client::Network;

use crate::config::{CliConfig, ConfigStore, parse_rpc_url};
use crate::error::CliError;
use crate::output;

/// Handle the init command
pub async fn handle_init_command(
    store: &ConfigStore,
    network: Option<&str>,
    rpc_url: Option<&str>,
    wallet: Option<&str>,
    json_format: bool,
) -> Result<(), CliError> {
    if !json_format {
        output::print_banner("Welcome to x402-cli", "Let's set up your payment toolkit");
    }

    let current = store.load().await;
    let update = build_update(&current, network, rpc_url, wallet)?;
    let saved = store.save(update).await?;

    if json_format {
        output::print_output(
            json!({
                "configPath": store.path().display().to_string(),
                "config": saved,
            }),
            true,
        );
    } else {
        output::print_init_summary(store.path(), &saved);
    }

    Ok(())
}

/// Values to write over `current`
///
/// Switching networks without an explicit RPC URL points `rpcUrl` at the
/// new network's public endpoint.
fn build_update(
    current: &CliConfig,
    network: Option<&str>,
    rpc_url: Option<&str>,
    wallet: Option<&str>,
) -> Result<CliConfig, CliError> {
    let network = network.map(Network::from_str).transpose()?;

    let rpc_url = match (rpc_url, network) {
        (Some(url), _) => {
            parse_rpc_url(url)?;
            Some(url.to_string())
        }
        (None, Some(network)) if current.network != Some(network) => {
            Some(network.rpc_url().to_string())
        }
        (None, _) => None,
    };

    Ok(CliConfig {
        rpc_url,
        network,
        default_wallet: wallet.map(str::to_string),
        ..CliConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_network_switch_resets_rpc_url() {
        let update = build_update(&CliConfig::defaults(), Some("testnet"), None, None).unwrap();
        assert_eq!(update.network, Some(Network::Testnet));
        assert_eq!(
            update.rpc_url.as_deref(),
            Some("https://api.testnet.solana.com")
        );
    }

    #[test]
    fn test_same_network_keeps_rpc_url() {
        let update = build_update(&CliConfig::defaults(), Some("devnet"), None, None).unwrap();
        assert_eq!(update.rpc_url, None);
    }

    #[test]
    fn test_explicit_rpc_url_is_validated() {
        let update = build_update(
            &CliConfig::defaults(),
            Some("mainnet-beta"),
            Some("https://rpc.example.com"),
            Some("~/.config/solana/id.json"),
        )
        .unwrap();
        assert_eq!(update.rpc_url.as_deref(), Some("https://rpc.example.com"));
        assert_eq!(
            update.default_wallet.as_deref(),
            Some("~/.config/solana/id.json")
        );

        assert!(build_update(&CliConfig::defaults(), None, Some("nope"), None).is_err());
    }

    #[test]
    fn test_invalid_network() {
        let err = build_update(&CliConfig::defaults(), Some("localnet"), None, None).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("devnet, mainnet-beta, testnet"));
    }

    #[tokio::test]
    async fn test_init_writes_config() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        handle_init_command(&store, Some("testnet"), None, Some("/keys/id.json"), true)
            .await
            .unwrap();

        let config = store.load().await;
        assert_eq!(config.network, Some(Network::Testnet));
        assert_eq!(config.default_wallet.as_deref(), Some("/keys/id.json"));
        assert_eq!(
            config.rpc_url.as_deref(),
            Some("https://api.testnet.solana.com")
        );
    }

    #[tokio::test]
    async fn test_invalid_network_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path().join("config.json"));

        let result = handle_init_command(&store, Some("localnet"), None, None, true).await;
        assert!(result.is_err());
        assert!(!store.path().exists());
    }
}
