// Copyright (c) 2024 Botho Foundation

use anyhow::Result;
use std::path::Path;
use tagging_contract_types::Address;

use super::Session;

/// Show the token balance and claimed rewards of an address
pub fn run(config_path: &Path, address: Address) -> Result<()> {
    let session = Session::open(config_path)?;
    let deployment = &session.deployment;
    let symbol = deployment.tags().symbol();

    println!();
    println!("=== Balance ===");
    println!("Address: {}", address);
    println!("Balance: {} {}", deployment.tags().balance_of(&address), symbol);
    println!(
        "Claimed: {} {}",
        deployment.rewards().rewards_of(&address),
        symbol
    );
    println!();

    Ok(())
}
