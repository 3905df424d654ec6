// Copyright (c) 2024 Botho Foundation

use serde::{Deserialize, Serialize};
use tagging_contract_types::{Address, Amount};

/// A balance-bearing tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Provider that created the tag and alone may clear it
    pub provider: Address,
    /// Current balance, never above the ledger's `max_balance`
    pub balance: Amount,
    /// Ledger nonce at creation
    pub created_at: u64,
}

impl Tag {
    pub fn new(provider: Address, balance: Amount, created_at: u64) -> Self {
        Self {
            provider,
            balance,
            created_at,
        }
    }

    /// Room left before the tag reaches `max_balance`.
    pub fn headroom(&self, max_balance: Amount) -> Amount {
        max_balance.saturating_sub(self.balance)
    }
}
