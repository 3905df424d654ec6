// Copyright (c) 2024 Botho Foundation

//! Provider registry contract.
//!
//! Keeps the set of addresses allowed to create and clear tags. Only the
//! registry owner (the deploying identity) may register providers, and
//! registration is idempotent. Other contracts consult the registry through
//! the read-only [`ProviderDirectory`] trait.

mod registry;

pub use registry::{ProviderDirectory, ProviderRegistry};

use tagging_contract_types::Address;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Unauthorized: {caller} is not the registry owner")]
    Unauthorized { caller: Address },
}
