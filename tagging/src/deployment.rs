// Copyright (c) 2024 Botho Foundation

//! The three contracts deployed together, and call dispatch.

use std::fmt;

use rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tagging_contract_types::{Address, Amount, CallContext, Event, Receipt, TagId, ENTROPY_LEN};
use tagging_provider::{ProviderError, ProviderRegistry};
use tagging_rewards::RewardsLedger;
use tagging_tags::{TagError, TagLedger};
use thiserror::Error;
use tracing::{debug, info};

use crate::Config;

/// A rejected call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallError {
    #[error("Provider registry: {0}")]
    Provider(#[from] ProviderError),

    #[error("Tags: {0}")]
    Tags(#[from] TagError),
}

/// An event in the deployment-wide log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    /// Index of the applied call that emitted it
    pub call_index: u64,
    /// Contract that emitted it
    pub contract: Address,
    pub event: Event,
}

/// Source of the per-call host entropy.
pub struct EntropySource(StdRng);

impl fmt::Debug for EntropySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EntropySource(..)")
    }
}

impl EntropySource {
    pub fn from_os() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Deterministic entropy, for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    fn next(&mut self) -> [u8; ENTROPY_LEN] {
        let mut bytes = [0u8; ENTROPY_LEN];
        self.0.fill_bytes(&mut bytes);
        bytes
    }
}

/// Rewards, Provider and Tags, deployed in that order by one deployer.
#[derive(Debug, Serialize, Deserialize)]
pub struct Deployment {
    deployer: Address,
    /// Number of contracts deployed so far by `deployer`
    deploy_nonce: u64,
    rewards: RewardsLedger,
    providers: ProviderRegistry,
    tags: TagLedger,
    /// Number of calls applied so far
    calls_applied: u64,
    events: Vec<LoggedEvent>,
    #[serde(skip, default = "EntropySource::from_os")]
    entropy: EntropySource,
}

impl Deployment {
    /// Deploy the contracts described by `config`.
    pub fn deploy(config: &Config) -> Result<Self, TagError> {
        let deployer = config.deployment.deployer;

        let rewards = RewardsLedger::new(Address::derive_contract(&deployer, 0));
        let providers = ProviderRegistry::new(Address::derive_contract(&deployer, 1), deployer);
        let tags = TagLedger::new(
            Address::derive_contract(&deployer, 2),
            providers.address(),
            rewards.address(),
            config.token.initial_supply,
            config.token.name.as_str(),
            config.token.symbol.as_str(),
            config.tags,
        )?;

        let entropy = match config.deployment.entropy_seed {
            Some(seed) => EntropySource::seeded(seed),
            None => EntropySource::from_os(),
        };

        info!(
            %deployer,
            rewards = %rewards.address(),
            providers = %providers.address(),
            tags = %tags.address(),
            "Contracts deployed"
        );

        Ok(Self {
            deployer,
            deploy_nonce: 3,
            rewards,
            providers,
            tags,
            calls_applied: 0,
            events: Vec::new(),
            entropy,
        })
    }

    /// Replace the host entropy source.
    pub fn set_entropy(&mut self, entropy: EntropySource) {
        self.entropy = entropy;
    }

    // === Calls ===

    pub fn register_provider(
        &mut self,
        caller: Address,
        provider: Address,
    ) -> Result<Receipt, CallError> {
        let contract = self.providers.address();
        self.dispatch(caller, contract, "register_provider", |this, ctx| {
            Ok(this.providers.register_provider(ctx, provider)?)
        })
    }

    pub fn create_tag(&mut self, caller: Address) -> Result<Receipt, CallError> {
        let contract = self.tags.address();
        self.dispatch(caller, contract, "create_tag", |this, ctx| {
            Ok(this.tags.create_tag(ctx, &this.providers)?)
        })
    }

    pub fn feed_tag(&mut self, caller: Address, tag_id: TagId) -> Result<Receipt, CallError> {
        let contract = self.tags.address();
        self.dispatch(caller, contract, "feed_tag", |this, ctx| {
            Ok(this.tags.feed_tag(ctx, tag_id)?)
        })
    }

    pub fn clear_tag(&mut self, caller: Address, tag_id: TagId) -> Result<Receipt, CallError> {
        let contract = self.tags.address();
        self.dispatch(caller, contract, "clear_tag", |this, ctx| {
            Ok(this.tags.clear_tag(ctx, tag_id)?)
        })
    }

    pub fn create_claim_for_tag(
        &mut self,
        caller: Address,
        tag_id: TagId,
    ) -> Result<Receipt, CallError> {
        let contract = self.tags.address();
        self.dispatch(caller, contract, "create_claim_for_tag", |this, ctx| {
            Ok(this
                .tags
                .create_claim_for_tag(ctx, tag_id, &mut this.rewards)?)
        })
    }

    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Receipt, CallError> {
        let contract = self.tags.address();
        self.dispatch(caller, contract, "transfer", |this, ctx| {
            Ok(this.tags.transfer(ctx, to, amount)?)
        })
    }

    pub fn approve(
        &mut self,
        caller: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<Receipt, CallError> {
        let contract = self.tags.address();
        self.dispatch(caller, contract, "approve", |this, ctx| {
            Ok(this.tags.approve(ctx, spender, amount)?)
        })
    }

    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Receipt, CallError> {
        let contract = self.tags.address();
        self.dispatch(caller, contract, "transfer_from", |this, ctx| {
            Ok(this.tags.transfer_from(ctx, from, to, amount)?)
        })
    }

    /// Run one call with a fresh context and log its events on success.
    ///
    /// Contracts check before they mutate, so a rejected call needs no
    /// rollback here.
    fn dispatch<F>(
        &mut self,
        caller: Address,
        contract: Address,
        method: &'static str,
        call: F,
    ) -> Result<Receipt, CallError>
    where
        F: FnOnce(&mut Self, &CallContext) -> Result<Receipt, CallError>,
    {
        let ctx = CallContext::new(caller, self.entropy.next());
        let receipt = call(self, &ctx).map_err(|err| {
            debug!(%caller, method, error = %err, "Call rejected");
            err
        })?;

        let call_index = self.calls_applied;
        self.calls_applied += 1;
        self.events
            .extend(receipt.logs.iter().cloned().map(|event| LoggedEvent {
                call_index,
                contract,
                event,
            }));

        debug!(%caller, method, call_index, events = receipt.logs.len(), "Call applied");
        Ok(receipt)
    }

    // === Queries ===

    pub fn deployer(&self) -> Address {
        self.deployer
    }

    pub fn deploy_nonce(&self) -> u64 {
        self.deploy_nonce
    }

    pub fn rewards(&self) -> &RewardsLedger {
        &self.rewards
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn tags(&self) -> &TagLedger {
        &self.tags
    }

    pub fn calls_applied(&self) -> u64 {
        self.calls_applied
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }
}
