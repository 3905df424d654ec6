// Copyright (c) 2024 Botho Foundation

use anyhow::{Context, Result};
use std::path::Path;
use tagging_contract_types::{Address, TagId};

use super::Session;

pub fn create(config_path: &Path, from: Option<Address>) -> Result<()> {
    let mut session = Session::open(config_path)?;
    let caller = session.caller(from);

    let result = session.deployment.create_tag(caller);
    let receipt = session.finish(result)?;

    if let Some(tag_id) = receipt.created_tag() {
        println!("\nTag id: {}", tag_id);
    }
    Ok(())
}

pub fn feed(config_path: &Path, from: Option<Address>, tag_id: TagId) -> Result<()> {
    let mut session = Session::open(config_path)?;
    let caller = session.caller(from);

    let result = session.deployment.feed_tag(caller, tag_id);
    session.finish(result)?;
    Ok(())
}

pub fn clear(config_path: &Path, from: Option<Address>, tag_id: TagId) -> Result<()> {
    let mut session = Session::open(config_path)?;
    let caller = session.caller(from);

    let result = session.deployment.clear_tag(caller, tag_id);
    session.finish(result)?;
    Ok(())
}

pub fn claim(config_path: &Path, from: Option<Address>, tag_id: TagId) -> Result<()> {
    let mut session = Session::open(config_path)?;
    let caller = session.caller(from);

    let result = session.deployment.create_claim_for_tag(caller, tag_id);
    session.finish(result)?;
    Ok(())
}

/// Show a single tag
pub fn show(config_path: &Path, tag_id: TagId) -> Result<()> {
    let session = Session::open(config_path)?;
    let tags = session.deployment.tags();
    let tag = tags
        .tag(&tag_id)
        .with_context(|| format!("Tag {} not found", tag_id))?;

    println!();
    println!("=== Tag ===");
    println!("Id:       {}", tag_id);
    println!("Provider: {}", tag.provider);
    println!(
        "Balance:  {} / {} {}",
        tag.balance,
        tags.policy().max_balance,
        tags.symbol()
    );
    println!("Created:  call nonce {}", tag.created_at);
    println!();

    Ok(())
}
