// Copyright (c) 2024 Botho Foundation

use anyhow::Result;
use std::path::Path;
use tagging_contract_types::{Address, Amount};

use super::Session;

/// Transfer tokens from the caller to `to`
pub fn run(config_path: &Path, from: Option<Address>, to: Address, amount: Amount) -> Result<()> {
    let mut session = Session::open(config_path)?;
    let caller = session.caller(from);

    let result = session.deployment.transfer(caller, to, amount);
    session.finish(result)?;
    Ok(())
}
