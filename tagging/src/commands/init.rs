// Copyright (c) 2024 Botho Foundation

use anyhow::{bail, Context, Result};
use rand::RngCore;
use std::path::Path;
use tagging::config::{state_path_from_config, Config};
use tagging::Deployment;
use tagging_contract_types::{Address, Amount, ADDRESS_LEN};
use tracing::info;

/// Run the init command
pub fn run(
    config_path: &Path,
    deployer: Option<Address>,
    supply: Option<Amount>,
    seed: Option<u64>,
) -> Result<()> {
    if Config::exists(config_path) {
        bail!(
            "Deployment already exists at {}\nUse a different --config path or delete the existing config.",
            config_path.display()
        );
    }

    let state_path = state_path_from_config(config_path);
    if state_path.exists() {
        bail!(
            "Deployment state already exists at {}\nUse a different --config path or delete the existing state.",
            state_path.display()
        );
    }

    let deployer = deployer.unwrap_or_else(random_address);

    let mut config = Config::new(deployer);
    config.deployment.entropy_seed = seed;
    if let Some(supply) = supply {
        config.token.initial_supply = supply;
    }

    let deployment = Deployment::deploy(&config).context("Failed to deploy contracts")?;

    config.save(config_path)?;
    deployment.save(&state_path)?;

    info!("Deployment initialized at {}", config_path.display());
    println!("\nContracts deployed.");
    println!("Deployer:  {}", deployer);
    println!("Rewards:   {}", deployment.rewards().address());
    println!("Provider:  {}", deployment.providers().address());
    println!("Tags:      {}", deployment.tags().address());
    println!(
        "Treasury:  {} {}",
        deployment.tags().treasury(),
        deployment.tags().symbol()
    );
    println!("\nConfig saved to: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Run 'tagging register-provider <address>' to add a provider");
    println!("  2. Run 'tagging create-tag --from <provider>' to create a tag");

    Ok(())
}

fn random_address() -> Address {
    let mut bytes = [0u8; ADDRESS_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    Address::new(bytes)
}
