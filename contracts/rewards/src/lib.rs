// Copyright (c) 2024 Botho Foundation

//! Rewards contract.
//!
//! Records the claims produced when value is redeemed from a tag and keeps
//! a running reward total per claimant. The tag ledger talks to it through
//! [`RewardsSink`].

mod ledger;

pub use ledger::{ClaimReceipt, RewardsLedger, RewardsSink};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RewardsError {
    #[error("Claim amount must be greater than zero")]
    ZeroAmount,

    #[error("Reward accrual overflow")]
    Overflow,
}
