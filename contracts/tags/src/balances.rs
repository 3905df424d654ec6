// Copyright (c) 2024 Botho Foundation

//! Account balances and allowances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tagging_contract_types::{Address, Amount};

use crate::TagError;

/// ERC20-style account book.
///
/// Every mutating method checks all of its preconditions first and leaves
/// the book untouched when it fails. Zero balances and allowances are not
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<Address, BTreeMap<Address, Amount>>,
}

impl Balances {
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Sum of all balances, widened so it cannot overflow.
    pub fn total(&self) -> u128 {
        self.balances.values().map(|&b| b as u128).sum()
    }

    /// Iterate over accounts with a non-zero balance.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or(0)
    }

    pub fn credit(&mut self, account: &Address, amount: Amount) -> Result<(), TagError> {
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(TagError::Overflow)?;
        self.set_balance(account, balance);
        Ok(())
    }

    pub fn debit(&mut self, account: &Address, amount: Amount) -> Result<(), TagError> {
        let have = self.balance_of(account);
        if have < amount {
            return Err(TagError::InsufficientBalance { have, need: amount });
        }
        self.set_balance(account, have - amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to`.
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<(), TagError> {
        let have = self.balance_of(from);
        if have < amount {
            return Err(TagError::InsufficientBalance { have, need: amount });
        }
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TagError::Overflow)?;

        self.set_balance(from, have - amount);
        self.set_balance(to, credited);
        Ok(())
    }

    pub fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: Amount) {
        if amount == 0 {
            if let Some(spenders) = self.allowances.get_mut(owner) {
                spenders.remove(spender);
                if spenders.is_empty() {
                    self.allowances.remove(owner);
                }
            }
        } else {
            self.allowances
                .entry(*owner)
                .or_default()
                .insert(*spender, amount);
        }
    }

    fn set_balance(&mut self, account: &Address, balance: Amount) {
        if balance == 0 {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, balance);
        }
    }
}
