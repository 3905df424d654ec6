// Copyright (c) 2024 Botho Foundation

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tagging::config;
use tagging_contract_types::{Address, Amount, TagId};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tagging")]
#[command(about = "Deploy and drive the tagging contracts", long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.tagging/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy a fresh set of contracts
    Init {
        /// Deploying identity (default: a random address)
        #[arg(long)]
        deployer: Option<Address>,

        /// Initial token supply held by the ledger treasury
        #[arg(long)]
        supply: Option<Amount>,

        /// Seed host entropy for reproducible tag ids
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Register an address as a tag provider (deployer only)
    RegisterProvider {
        provider: Address,

        /// Calling identity (default: the deployer)
        #[arg(long)]
        from: Option<Address>,
    },

    /// Create a new tag funded from the treasury
    CreateTag {
        #[arg(long)]
        from: Option<Address>,
    },

    /// Top up a tag from the treasury
    FeedTag {
        tag_id: TagId,

        #[arg(long)]
        from: Option<Address>,
    },

    /// Remove a tag, returning its balance to the treasury
    ClearTag {
        tag_id: TagId,

        #[arg(long)]
        from: Option<Address>,
    },

    /// Claim a reward from a tag
    Claim {
        tag_id: TagId,

        #[arg(long)]
        from: Option<Address>,
    },

    /// Transfer tokens
    Transfer {
        to: Address,

        amount: Amount,

        #[arg(long)]
        from: Option<Address>,
    },

    /// Show the token balance of an address
    Balance { address: Address },

    /// Show a tag
    Tag { tag_id: TagId },

    /// Show deployment status
    Status,

    /// Show the event log
    Events {
        /// Only show the most recent events
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(config::default_config_path);

    match cli.command {
        Commands::Init {
            deployer,
            supply,
            seed,
        } => commands::init::run(&config_path, deployer, supply, seed),
        Commands::RegisterProvider { provider, from } => {
            commands::provider::register(&config_path, from, provider)
        }
        Commands::CreateTag { from } => commands::tag::create(&config_path, from),
        Commands::FeedTag { tag_id, from } => commands::tag::feed(&config_path, from, tag_id),
        Commands::ClearTag { tag_id, from } => commands::tag::clear(&config_path, from, tag_id),
        Commands::Claim { tag_id, from } => commands::tag::claim(&config_path, from, tag_id),
        Commands::Transfer { to, amount, from } => {
            commands::transfer::run(&config_path, from, to, amount)
        }
        Commands::Balance { address } => commands::balance::run(&config_path, address),
        Commands::Tag { tag_id } => commands::tag::show(&config_path, tag_id),
        Commands::Status => commands::status::run(&config_path),
        Commands::Events { limit } => commands::status::events(&config_path, limit),
    }
}
