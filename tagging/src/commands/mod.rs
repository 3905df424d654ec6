// Copyright (c) 2024 Botho Foundation

pub mod balance;
pub mod init;
pub mod provider;
pub mod status;
pub mod tag;
pub mod transfer;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tagging::config::{state_path_from_config, Config};
use tagging::{CallError, Deployment};
use tagging_contract_types::{Address, Receipt};

/// A deployment opened from disk, with where to write it back.
pub struct Session {
    pub config: Config,
    pub deployment: Deployment,
    state_path: PathBuf,
}

impl Session {
    pub fn open(config_path: &Path) -> Result<Self> {
        let config = Config::load(config_path)
            .context("No deployment found. Run 'tagging init' first.")?;

        let state_path = state_path_from_config(config_path);
        let deployment = Deployment::load(&state_path)?;

        Ok(Self {
            config,
            deployment,
            state_path,
        })
    }

    /// Identity to call as: `from`, or the deployer.
    pub fn caller(&self, from: Option<Address>) -> Address {
        from.unwrap_or(self.config.deployment.deployer)
    }

    /// Print the outcome of a call and persist the deployment if it applied.
    pub fn finish(self, result: Result<Receipt, CallError>) -> Result<Receipt> {
        let receipt = result?;
        print_receipt(&receipt);
        self.deployment.save(&self.state_path)?;
        Ok(receipt)
    }
}

pub fn print_receipt(receipt: &Receipt) {
    if receipt.logs.is_empty() {
        println!("Applied (no events)");
        return;
    }
    for event in &receipt.logs {
        println!("  {}", event);
    }
}
