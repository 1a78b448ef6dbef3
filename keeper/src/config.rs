//! Keeper configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC URL for Solana cluster
    pub rpc_url: String,

    /// Router program ID
    #[serde(with = "base58")]
    pub router_program: Pubkey,

    /// Router account to watch
    #[serde(with = "base58")]
    pub router_state: Pubkey,

    /// Keeper wallet keypair path (pays for rebalance transactions)
    pub keypair_path: String,

    /// Polling interval in seconds
    pub poll_interval_secs: u64,

    /// Log rebalance decisions without submitting them
    #[serde(default)]
    pub dry_run: bool,
}

/// Pubkeys are written as base58 strings in the config file
mod base58 {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(key)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(D::Error::custom)
    }
}

impl Config {
    /// Config file path, `KEEPER_CONFIG` or `keeper-config.toml`
    pub fn path() -> String {
        std::env::var("KEEPER_CONFIG").unwrap_or_else(|_| "keeper-config.toml".to_string())
    }

    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        let config_path = Self::path();

        let config_str = std::fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {}", config_path))?;

        Self::from_toml(&config_str)
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        toml::from_str(config_str).context("Failed to parse config TOML")
    }

    /// Create default configuration
    pub fn default_devnet() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            router_program: Pubkey::new_from_array(harbor_router::ID),
            router_state: Pubkey::default(),
            keypair_path: "~/.config/solana/id.json".to_string(),
            poll_interval_secs: 10,
            dry_run: true,
        }
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_devnet();
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}
