//! Configuration management for the x402 CLI

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};
use url::Url;
use x402_client::Network;

use crate::error::{CliError, ConfigError};

/// Persisted user defaults
///
/// Keys this version does not know about are kept in `extra` so a save
/// never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CliConfig {
    /// RPC endpoint used when the effective network matches `network`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// Default network
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,

    /// Default payer keypair path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_wallet: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CliConfig {
    /// Built-in defaults applied before any file values
    pub fn defaults() -> Self {
        Self {
            rpc_url: Some(Network::Devnet.rpc_url().to_string()),
            network: Some(Network::Devnet),
            default_wallet: None,
            extra: Map::new(),
        }
    }

    /// Overlay every value set in `other` onto `self`
    pub fn merge(&mut self, other: CliConfig) {
        if other.rpc_url.is_some() {
            self.rpc_url = other.rpc_url;
        }
        if other.network.is_some() {
            self.network = other.network;
        }
        if other.default_wallet.is_some() {
            self.default_wallet = other.default_wallet;
        }
        self.extra.extend(other.extra);
    }

    /// Network from the flag, else the configured one
    pub fn resolve_network(&self, flag: Option<&str>) -> Result<Network, CliError> {
        match flag {
            Some(name) => Ok(Network::from_str(name)?),
            None => Ok(self.network.unwrap_or_default()),
        }
    }

    /// RPC endpoint for `network`
    ///
    /// An explicit flag wins. The configured `rpcUrl` only applies when
    /// `network` is the configured network, otherwise the public endpoint of
    /// `network` is used.
    pub fn resolve_rpc_url(&self, flag: Option<&str>, network: Network) -> Result<Url, CliError> {
        let raw = match flag {
            Some(url) => url,
            None => match (&self.rpc_url, self.network) {
                (Some(url), Some(configured)) if configured == network => url.as_str(),
                _ => network.rpc_url(),
            },
        };

        parse_rpc_url(raw)
    }

    /// Payer keypair from the flag, else the configured default wallet
    pub fn resolve_wallet(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.default_wallet.as_deref().map(expand_home))
    }
}

/// Parse and validate an RPC endpoint URL
pub fn parse_rpc_url(raw: &str) -> Result<Url, CliError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(ConfigError::InvalidUrl(format!(
            "unsupported scheme '{}'; expected http or https",
            scheme
        ))
        .into()),
    }
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// JSON file holding a [`CliConfig`]
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `path` when given, else `~/.x402-cli/config.json`
    pub fn locate(path: Option<PathBuf>) -> Result<Self, CliError> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Ok(Self::new(Self::default_path()?)),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf, CliError> {
        let home_dir = dirs::home_dir().ok_or_else(|| CliError::Generic {
            message: "Could not find home directory".to_string(),
        })?;

        Ok(home_dir.join(".x402-cli").join("config.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Defaults overlaid with the file values
    ///
    /// A missing or unreadable file yields the defaults.
    pub async fn load(&self) -> CliConfig {
        let mut config = CliConfig::defaults();
        if let Some(stored) = self.read().await {
            config.merge(stored);
        }
        config
    }

    /// Merge `update` over the current configuration and write it back
    pub async fn save(&self, update: CliConfig) -> Result<CliConfig, CliError> {
        let mut merged = self.load().await;
        merged.merge(update);

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(ConfigError::DirectoryCreation)?;
        }

        let content = serde_json::to_string_pretty(&merged).map_err(ConfigError::InvalidFormat)?;
        tokio::fs::write(&self.path, content).await?;
        debug!("saved configuration to {}", self.path.display());

        Ok(merged)
    }

    async fn read(&self) -> Option<CliConfig> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(
                    "could not read config file {}: {}; using defaults",
                    self.path.display(),
                    e
                );
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(
                    "ignoring corrupted config file {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> ConfigStore {
        ConfigStore::new(dir.path().join("nested").join("config.json"))
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = store(&dir).load().await;
        assert_eq!(config, CliConfig::defaults());
        assert_eq!(config.rpc_url.as_deref(), Some("https://api.devnet.solana.com"));
    }

    #[tokio::test]
    async fn test_corrupted_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let config = ConfigStore::new(&path).load().await;
        assert_eq!(config, CliConfig::defaults());
    }

    #[tokio::test]
    async fn test_file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"network": "testnet", "defaultWallet": "/tmp/id.json"}"#)
            .await
            .unwrap();

        let config = ConfigStore::new(&path).load().await;
        assert_eq!(config.network, Some(Network::Testnet));
        assert_eq!(config.default_wallet.as_deref(), Some("/tmp/id.json"));
        assert_eq!(config.rpc_url.as_deref(), Some("https://api.devnet.solana.com"));
    }

    #[tokio::test]
    async fn test_save_merges_with_existing() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store
            .save(CliConfig {
                default_wallet: Some("/keys/payer.json".to_string()),
                ..CliConfig::default()
            })
            .await
            .unwrap();
        let saved = store
            .save(CliConfig {
                network: Some(Network::MainnetBeta),
                ..CliConfig::default()
            })
            .await
            .unwrap();

        assert_eq!(saved.network, Some(Network::MainnetBeta));
        assert_eq!(saved.default_wallet.as_deref(), Some("/keys/payer.json"));

        let on_disk: Value =
            serde_json::from_str(&tokio::fs::read_to_string(store.path()).await.unwrap()).unwrap();
        assert_eq!(
            on_disk,
            json!({
                "rpcUrl": "https://api.devnet.solana.com",
                "network": "mainnet-beta",
                "defaultWallet": "/keys/payer.json"
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_keys_survive_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        tokio::fs::write(&path, r#"{"network": "devnet", "theme": "dark"}"#)
            .await
            .unwrap();

        let store = ConfigStore::new(&path);
        let saved = store.save(CliConfig::default()).await.unwrap();
        assert_eq!(saved.extra.get("theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_resolve_network() {
        let config = CliConfig {
            network: Some(Network::Testnet),
            ..CliConfig::default()
        };
        assert_eq!(config.resolve_network(None).unwrap(), Network::Testnet);
        assert_eq!(
            config.resolve_network(Some("mainnet-beta")).unwrap(),
            Network::MainnetBeta
        );
        assert_matches!(
            config.resolve_network(Some("localnet")),
            Err(CliError::Validation(_))
        );
        assert_eq!(
            CliConfig::default().resolve_network(None).unwrap(),
            Network::Devnet
        );
    }

    #[test]
    fn test_resolve_rpc_url() {
        let config = CliConfig {
            rpc_url: Some("http://localhost:8899".to_string()),
            network: Some(Network::Devnet),
            ..CliConfig::default()
        };

        assert_eq!(
            config.resolve_rpc_url(None, Network::Devnet).unwrap().as_str(),
            "http://localhost:8899/"
        );
        assert_eq!(
            config.resolve_rpc_url(None, Network::Testnet).unwrap().as_str(),
            "https://api.testnet.solana.com/"
        );
        assert_eq!(
            config
                .resolve_rpc_url(Some("https://rpc.example.com"), Network::Testnet)
                .unwrap()
                .as_str(),
            "https://rpc.example.com/"
        );
        assert_matches!(
            config.resolve_rpc_url(Some("not a url"), Network::Devnet),
            Err(CliError::Config(ConfigError::InvalidUrl(_)))
        );
        assert!(config.resolve_rpc_url(Some("ftp://rpc.example.com"), Network::Devnet).is_err());
    }

    #[test]
    fn test_resolve_wallet() {
        let config = CliConfig {
            default_wallet: Some("/keys/default.json".to_string()),
            ..CliConfig::default()
        };
        assert_eq!(
            config.resolve_wallet(Some(PathBuf::from("/keys/other.json"))),
            Some(PathBuf::from("/keys/other.json"))
        );
        assert_eq!(
            config.resolve_wallet(None),
            Some(PathBuf::from("/keys/default.json"))
        );
        assert_eq!(CliConfig::default().resolve_wallet(None), None);
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/id.json"), PathBuf::from("/abs/id.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/id.json"), home.join("id.json"));
        }
    }
}
