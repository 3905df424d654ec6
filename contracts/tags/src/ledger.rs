// Copyright (c) 2024 Botho Foundation

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tagging_contract_types::{Address, Amount, CallContext, Event, Receipt, TagId};
use tagging_provider::ProviderDirectory;
use tagging_rewards::RewardsSink;
use tracing::{debug, info};

use crate::{Balances, Tag, TagError, TagPolicy};

/// Tags contract state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagLedger {
    /// Address of this contract, which also holds the treasury
    address: Address,
    /// Provider registry consulted on create
    provider_registry: Address,
    /// Rewards contract receiving claims
    rewards: Address,
    name: String,
    symbol: String,
    total_supply: Amount,
    policy: TagPolicy,
    /// Bumped on every tag creation; never reused
    nonce: u64,
    balances: Balances,
    tags: BTreeMap<TagId, Tag>,
}

impl TagLedger {
    /// Token decimals. Amounts are whole units.
    pub const DECIMALS: u8 = 0;

    /// Create the ledger and mint `initial_supply` to its treasury.
    pub fn new(
        address: Address,
        provider_registry: Address,
        rewards: Address,
        initial_supply: Amount,
        name: impl Into<String>,
        symbol: impl Into<String>,
        policy: TagPolicy,
    ) -> Result<Self, TagError> {
        policy.validate()?;

        let mut balances = Balances::default();
        balances.credit(&address, initial_supply)?;

        let ledger = Self {
            address,
            provider_registry,
            rewards,
            name: name.into(),
            symbol: symbol.into(),
            total_supply: initial_supply,
            policy,
            nonce: 0,
            balances,
            tags: BTreeMap::new(),
        };
        info!(
            address = %ledger.address,
            supply = initial_supply,
            symbol = %ledger.symbol,
            "Tag ledger created"
        );
        Ok(ledger)
    }

    // === Tag lifecycle ===

    /// Create a tag funded from the treasury. Providers only.
    pub fn create_tag<P>(&mut self, ctx: &CallContext, providers: &P) -> Result<Receipt, TagError>
    where
        P: ProviderDirectory + ?Sized,
    {
        if !providers.is_provider(&ctx.caller) {
            debug!(caller = %ctx.caller, "create_tag rejected: caller is not a provider");
            return Err(TagError::Forbidden { caller: ctx.caller });
        }
        let next_nonce = self.nonce.checked_add(1).ok_or(TagError::Overflow)?;
        let amount = self.policy.create_amount;

        debit_treasury(&mut self.balances, &self.address, amount)?;

        let tag_id = TagId::derive(&self.address, &ctx.caller, self.nonce, &ctx.entropy);
        self.tags
            .insert(tag_id, Tag::new(ctx.caller, amount, self.nonce));
        self.nonce = next_nonce;

        info!(%tag_id, creator = %ctx.caller, balance = amount, "Tag created");
        Ok(Receipt::single(Event::TagIdGenerated {
            creator: ctx.caller,
            tag_id,
        }))
    }

    /// Top a tag up from the treasury, capped at the maximum. Anyone may feed.
    pub fn feed_tag(&mut self, ctx: &CallContext, tag_id: TagId) -> Result<Receipt, TagError> {
        let max_balance = self.policy.max_balance;
        let tag = self
            .tags
            .get_mut(&tag_id)
            .ok_or(TagError::NotFound(tag_id))?;

        let headroom = tag.headroom(max_balance);
        if headroom == 0 {
            debug!(%tag_id, caller = %ctx.caller, "feed_tag rejected: tag is at maximum");
            return Err(TagError::TagAtMaximum(tag_id));
        }
        let amount = self.policy.feed_amount.min(headroom);

        debit_treasury(&mut self.balances, &self.address, amount)?;
        tag.balance += amount;

        debug!(%tag_id, amount, balance = tag.balance, "Tag fed");
        Ok(Receipt::single(Event::TagFed {
            tag_id,
            amount,
            balance: tag.balance,
        }))
    }

    /// Retire a tag and return its balance to the treasury. Only the
    /// creating provider may clear it; the entry is deleted.
    pub fn clear_tag(&mut self, ctx: &CallContext, tag_id: TagId) -> Result<Receipt, TagError> {
        let tag = *self.tags.get(&tag_id).ok_or(TagError::NotFound(tag_id))?;
        if tag.provider != ctx.caller {
            debug!(%tag_id, caller = %ctx.caller, "clear_tag rejected: caller is not the tag provider");
            return Err(TagError::Forbidden { caller: ctx.caller });
        }

        self.balances.credit(&self.address, tag.balance)?;
        self.tags.remove(&tag_id);

        info!(%tag_id, returned = tag.balance, "Tag cleared");
        Ok(Receipt::single(Event::TagIdRemoved { tag_id }))
    }

    /// Redeem value from a tag into a claim.
    ///
    /// The amount comes from the claim policy. The claim is recorded by
    /// `rewards` first; only when that succeeds does the amount move from
    /// the tag to the caller's balance.
    pub fn create_claim_for_tag<R>(
        &mut self,
        ctx: &CallContext,
        tag_id: TagId,
        rewards: &mut R,
    ) -> Result<Receipt, TagError>
    where
        R: RewardsSink + ?Sized,
    {
        let tag = self
            .tags
            .get_mut(&tag_id)
            .ok_or(TagError::NotFound(tag_id))?;

        let amount = self.policy.claim_policy.amount_for(tag.balance);
        if amount == 0 || amount > tag.balance {
            debug!(%tag_id, balance = tag.balance, amount, "Claim rejected: tag balance too low");
            return Err(TagError::InsufficientTagBalance {
                have: tag.balance,
                need: amount.max(1),
            });
        }
        let credited = self
            .balances
            .balance_of(&ctx.caller)
            .checked_add(amount)
            .ok_or(TagError::Overflow)?;

        let claim = rewards.record_claim(tag_id, amount, ctx.caller)?;

        tag.balance -= amount;
        self.balances.credit(&ctx.caller, amount)?;
        debug_assert_eq!(self.balances.balance_of(&ctx.caller), credited);

        info!(
            %tag_id,
            claimant = %ctx.caller,
            amount,
            claim_id = claim.claim_id,
            "Claim created"
        );
        Ok(Receipt::single(Event::ClaimGenerated {
            tag_id,
            claimant: ctx.caller,
            amount,
            claim_id: claim.claim_id,
        }))
    }

    // === Token ===

    pub fn transfer(
        &mut self,
        ctx: &CallContext,
        to: Address,
        amount: Amount,
    ) -> Result<Receipt, TagError> {
        self.balances.transfer(&ctx.caller, &to, amount)?;

        debug!(from = %ctx.caller, %to, amount, "Transfer");
        Ok(Receipt::single(Event::Transfer {
            from: ctx.caller,
            to,
            amount,
        }))
    }

    /// Allow `spender` to move up to `amount` of the caller's tokens,
    /// replacing any previous allowance.
    pub fn approve(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        amount: Amount,
    ) -> Result<Receipt, TagError> {
        self.balances.set_allowance(&ctx.caller, &spender, amount);

        debug!(owner = %ctx.caller, %spender, amount, "Approval");
        Ok(Receipt::single(Event::Approval {
            owner: ctx.caller,
            spender,
            amount,
        }))
    }

    pub fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Receipt, TagError> {
        let allowed = self.balances.allowance(&from, &ctx.caller);
        if allowed < amount {
            return Err(TagError::InsufficientAllowance {
                have: allowed,
                need: amount,
            });
        }

        self.balances.transfer(&from, &to, amount)?;
        self.balances
            .set_allowance(&from, &ctx.caller, allowed - amount);

        debug!(spender = %ctx.caller, %from, %to, amount, "Transfer from");
        Ok(Receipt::single(Event::Transfer { from, to, amount }))
    }

    // === Queries ===

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn provider_registry(&self) -> Address {
        self.provider_registry
    }

    pub fn rewards(&self) -> Address {
        self.rewards
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        Self::DECIMALS
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    pub fn policy(&self) -> &TagPolicy {
        &self.policy
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.balance_of(account)
    }

    /// The unallocated supply held by the ledger itself.
    pub fn treasury(&self) -> Amount {
        self.balances.balance_of(&self.address)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.balances.allowance(owner, spender)
    }

    pub fn balances(&self) -> &Balances {
        &self.balances
    }

    pub fn tag(&self, tag_id: &TagId) -> Option<&Tag> {
        self.tags.get(tag_id)
    }

    pub fn tags(&self) -> impl Iterator<Item = (&TagId, &Tag)> {
        self.tags.iter()
    }

    /// Check the policy, the supply invariant and the tag balance bound.
    pub fn check_invariants(&self) -> Result<(), TagError> {
        self.policy.validate()?;

        let in_tags: u128 = self.tags.values().map(|tag| tag.balance as u128).sum();
        let in_accounts = self.balances.total();
        if in_accounts + in_tags != self.total_supply as u128 {
            return Err(TagError::InvariantViolated(format!(
                "accounts {} + tags {} != total supply {}",
                in_accounts, in_tags, self.total_supply
            )));
        }

        if let Some((tag_id, tag)) = self
            .tags
            .iter()
            .find(|(_, tag)| tag.balance > self.policy.max_balance)
        {
            return Err(TagError::InvariantViolated(format!(
                "tag {} holds {} above maximum {}",
                tag_id, tag.balance, self.policy.max_balance
            )));
        }
        Ok(())
    }
}

/// Debit the treasury, reporting a shortfall as `InsufficientTreasury`.
fn debit_treasury(
    balances: &mut Balances,
    treasury: &Address,
    amount: Amount,
) -> Result<(), TagError> {
    balances.debit(treasury, amount).map_err(|err| match err {
        TagError::InsufficientBalance { have, need } => {
            TagError::InsufficientTreasury { have, need }
        }
        other => other,
    })
}
