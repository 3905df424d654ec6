// Copyright (c) 2024 Botho Foundation

//! Deployment configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tagging_contract_types::{Address, Amount};
use tagging_tags::TagPolicy;

/// Main configuration for a tagging deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub deployment: DeploymentConfig,

    #[serde(default)]
    pub token: TokenConfig,

    /// Tag lifecycle parameters
    #[serde(default)]
    pub tags: TagPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentConfig {
    /// Deploying identity; owns the provider registry
    pub deployer: Address,

    /// Seed for host entropy. Only for reproducible runs: it makes tag ids
    /// predictable.
    #[serde(default)]
    pub entropy_seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Whole supply, minted to the ledger treasury at deployment
    #[serde(default = "default_initial_supply")]
    pub initial_supply: Amount,
}

fn default_name() -> String {
    "Tags".to_string()
}

fn default_symbol() -> String {
    "TAG".to_string()
}

fn default_initial_supply() -> Amount {
    1000
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            symbol: default_symbol(),
            initial_supply: default_initial_supply(),
        }
    }
}

impl Config {
    /// Create a default config deployed by `deployer`
    pub fn new(deployer: Address) -> Self {
        Self {
            deployment: DeploymentConfig {
                deployer,
                entropy_seed: None,
            },
            token: TokenConfig::default(),
            tags: TagPolicy::default(),
        }
    }

    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Check if config file exists
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }
}

/// Get the default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tagging")
}

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.toml")
}

/// Get the deployment state path, which lives next to the config file
pub fn state_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .unwrap_or(config_path)
        .join("state.json")
}
