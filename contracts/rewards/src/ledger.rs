// Copyright (c) 2024 Botho Foundation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tagging_contract_types::{Address, Amount, TagId};
use tracing::info;

use crate::RewardsError;

/// A recorded claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReceipt {
    /// Sequential claim number, starting at zero
    pub claim_id: u64,
    /// Tag the value was redeemed from
    pub tag_id: TagId,
    /// Redeemed amount
    pub amount: Amount,
    /// Account that made the claim
    pub claimant: Address,
}

/// Receiver of claims.
///
/// `record_claim` must be atomic: on error nothing is recorded.
pub trait RewardsSink {
    fn record_claim(
        &mut self,
        tag_id: TagId,
        amount: Amount,
        claimant: Address,
    ) -> Result<ClaimReceipt, RewardsError>;
}

/// In-memory rewards bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsLedger {
    address: Address,
    claims: Vec<ClaimReceipt>,
    accrued: BTreeMap<Address, Amount>,
}

impl RewardsLedger {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            claims: Vec::new(),
            accrued: BTreeMap::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// All claims, in the order they were recorded.
    pub fn claims(&self) -> &[ClaimReceipt] {
        &self.claims
    }

    pub fn claim(&self, claim_id: u64) -> Option<&ClaimReceipt> {
        usize::try_from(claim_id)
            .ok()
            .and_then(|index| self.claims.get(index))
    }

    /// Total rewards accrued by `claimant`.
    pub fn rewards_of(&self, claimant: &Address) -> Amount {
        self.accrued.get(claimant).copied().unwrap_or(0)
    }
}

impl RewardsSink for RewardsLedger {
    fn record_claim(
        &mut self,
        tag_id: TagId,
        amount: Amount,
        claimant: Address,
    ) -> Result<ClaimReceipt, RewardsError> {
        if amount == 0 {
            return Err(RewardsError::ZeroAmount);
        }
        let accrued = self
            .rewards_of(&claimant)
            .checked_add(amount)
            .ok_or(RewardsError::Overflow)?;

        let receipt = ClaimReceipt {
            claim_id: self.claims.len() as u64,
            tag_id,
            amount,
            claimant,
        };
        self.claims.push(receipt);
        self.accrued.insert(claimant, accrued);

        info!(
            claim_id = receipt.claim_id,
            %tag_id,
            %claimant,
            amount,
            "Claim recorded"
        );
        Ok(receipt)
    }
}
