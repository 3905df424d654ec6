// Copyright (c) 2024 Botho Foundation

//! Host for the tagging contracts.
//!
//! Stands in for the ledger platform the contracts run on: it deploys
//! Rewards, Provider and Tags in that order, attaches a caller identity and
//! fresh entropy to each call, keeps the event log, and persists the whole
//! deployment between runs.

#![deny(clippy::print_stdout)]

pub mod config;
pub mod deployment;
pub mod shared;
pub mod store;

pub use config::Config;
pub use deployment::{CallError, Deployment, EntropySource, LoggedEvent};
pub use shared::SharedDeployment;
