// Copyright (c) 2024 Botho Foundation

use anyhow::Result;
use std::path::Path;

use super::Session;

/// Show deployment status
pub fn run(config_path: &Path) -> Result<()> {
    let session = Session::open(config_path)?;
    let deployment = &session.deployment;
    let tags = deployment.tags();
    let policy = tags.policy();

    println!();
    println!("=== Deployment ===");
    println!("Deployer:       {}", deployment.deployer());
    println!("Rewards:        {}", deployment.rewards().address());
    println!("Provider:       {}", deployment.providers().address());
    println!("Tags:           {}", tags.address());
    println!("Calls applied:  {}", deployment.calls_applied());
    println!();
    println!("=== Token ===");
    println!("Name:           {} ({})", tags.name(), tags.symbol());
    println!("Total supply:   {}", tags.total_supply());
    println!("Treasury:       {}", tags.treasury());
    println!();
    println!("=== Tags ===");
    println!("Providers:      {}", deployment.providers().len());
    println!("Live tags:      {}", tags.tags().count());
    println!(
        "Policy:         create {} / feed {} / max {} / claim {:?}",
        policy.create_amount, policy.feed_amount, policy.max_balance, policy.claim_policy
    );
    println!("Claims:         {}", deployment.rewards().claims().len());
    println!();

    Ok(())
}

/// Print the event log, oldest first
pub fn events(config_path: &Path, limit: Option<usize>) -> Result<()> {
    let session = Session::open(config_path)?;
    let events = session.deployment.events();
    let skip = limit.map_or(0, |limit| events.len().saturating_sub(limit));

    if events.is_empty() {
        println!("No events");
    }
    for logged in &events[skip..] {
        println!("#{:<6} {}  {}", logged.call_index, logged.contract, logged.event);
    }

    Ok(())
}
