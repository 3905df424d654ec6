// Copyright (c) 2024 Botho Foundation

use anyhow::Result;
use std::path::Path;
use tagging_contract_types::Address;

use super::Session;

/// Register `provider` in the provider registry
pub fn register(config_path: &Path, from: Option<Address>, provider: Address) -> Result<()> {
    let mut session = Session::open(config_path)?;
    let caller = session.caller(from);

    let result = session.deployment.register_provider(caller, provider);
    let receipt = session.finish(result)?;

    if receipt.logs.is_empty() {
        println!("{} was already a provider", provider);
    }
    Ok(())
}
