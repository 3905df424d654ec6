// Copyright (c) 2024 Botho Foundation

use tagging_contract_types::{Address, Amount, TagId};
use tagging_rewards::RewardsError;
use thiserror::Error;

/// Errors from the tags contract.
///
/// Every variant is a rejected call with no effect on state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("Forbidden: {caller} may not perform this operation")]
    Forbidden { caller: Address },

    #[error("Tag not found: {0}")]
    NotFound(TagId),

    #[error("Tag is at maximum: {0}")]
    TagAtMaximum(TagId),

    #[error("Insufficient treasury: have {have}, need {need}")]
    InsufficientTreasury { have: Amount, need: Amount },

    #[error("Insufficient tag balance: have {have}, need {need}")]
    InsufficientTagBalance { have: Amount, need: Amount },

    #[error("Insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: Amount, need: Amount },

    #[error("Insufficient allowance: have {have}, need {need}")]
    InsufficientAllowance { have: Amount, need: Amount },

    #[error("Invalid tag policy: {0}")]
    InvalidPolicy(&'static str),

    #[error("Rewards rejected the claim: {0}")]
    Rewards(#[from] RewardsError),

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Invariant violated: {0}")]
    InvariantViolated(String),
}
