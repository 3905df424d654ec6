// Copyright (c) 2024 Botho Foundation

//! Numeric parameters of the tag lifecycle.

use serde::{Deserialize, Serialize};
use tagging_contract_types::Amount;

use crate::TagError;

/// Amount moved from the treasury into a new tag.
pub const DEFAULT_CREATE_AMOUNT: Amount = 50;

/// Upper bound of a tag balance.
pub const DEFAULT_MAX_BALANCE: Amount = 50;

/// Amount a single feed adds to a tag (capped at the maximum).
pub const DEFAULT_FEED_AMOUNT: Amount = 10;

/// Amount redeemed by a claim under the default policy.
pub const DEFAULT_CLAIM_AMOUNT: Amount = 10;

/// How much a claim redeems from a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClaimPolicy {
    /// A fixed amount per claim
    Fixed { amount: Amount },
    /// Everything left in the tag
    WholeBalance,
}

impl ClaimPolicy {
    /// The amount a claim on a tag holding `balance` asks for.
    pub fn amount_for(&self, balance: Amount) -> Amount {
        match self {
            ClaimPolicy::Fixed { amount } => *amount,
            ClaimPolicy::WholeBalance => balance,
        }
    }
}

impl Default for ClaimPolicy {
    fn default() -> Self {
        ClaimPolicy::Fixed {
            amount: DEFAULT_CLAIM_AMOUNT,
        }
    }
}

/// Tag lifecycle parameters, fixed at ledger construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPolicy {
    #[serde(default = "default_create_amount")]
    pub create_amount: Amount,

    #[serde(default = "default_feed_amount")]
    pub feed_amount: Amount,

    #[serde(default = "default_max_balance")]
    pub max_balance: Amount,

    #[serde(default)]
    pub claim_policy: ClaimPolicy,
}

fn default_create_amount() -> Amount {
    DEFAULT_CREATE_AMOUNT
}

fn default_feed_amount() -> Amount {
    DEFAULT_FEED_AMOUNT
}

fn default_max_balance() -> Amount {
    DEFAULT_MAX_BALANCE
}

impl Default for TagPolicy {
    fn default() -> Self {
        Self {
            create_amount: DEFAULT_CREATE_AMOUNT,
            feed_amount: DEFAULT_FEED_AMOUNT,
            max_balance: DEFAULT_MAX_BALANCE,
            claim_policy: ClaimPolicy::default(),
        }
    }
}

impl TagPolicy {
    pub fn validate(&self) -> Result<(), TagError> {
        if self.max_balance == 0 {
            return Err(TagError::InvalidPolicy("max_balance must be positive"));
        }
        if self.create_amount == 0 || self.create_amount > self.max_balance {
            return Err(TagError::InvalidPolicy(
                "create_amount must be in 1..=max_balance",
            ));
        }
        if self.feed_amount == 0 {
            return Err(TagError::InvalidPolicy("feed_amount must be positive"));
        }
        if let ClaimPolicy::Fixed { amount } = self.claim_policy {
            if amount == 0 || amount > self.max_balance {
                return Err(TagError::InvalidPolicy(
                    "fixed claim amount must be in 1..=max_balance",
                ));
            }
        }
        Ok(())
    }
}
