// Copyright (c) 2024 Botho Foundation

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tagging_contract_types::{Address, CallContext, Event, Receipt};
use tracing::{debug, info};

use crate::ProviderError;

/// Read-only view of a provider set.
///
/// This is the only relation the tag ledger has with the registry: it asks
/// whether a caller is a provider and never mutates the set.
pub trait ProviderDirectory {
    fn is_provider(&self, address: &Address) -> bool;
}

/// Registry contract state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRegistry {
    /// Address of this contract
    address: Address,
    /// The only identity allowed to register providers
    owner: Address,
    /// Registered providers
    providers: BTreeSet<Address>,
}

impl ProviderRegistry {
    /// Create an empty registry owned by `owner`.
    pub fn new(address: Address, owner: Address) -> Self {
        Self {
            address,
            owner,
            providers: BTreeSet::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Register `provider`.
    ///
    /// Only callable by the owner. Registering an existing provider succeeds
    /// with an empty receipt; a new provider yields one
    /// `ProviderRegistered` event.
    pub fn register_provider(
        &mut self,
        ctx: &CallContext,
        provider: Address,
    ) -> Result<Receipt, ProviderError> {
        if ctx.caller != self.owner {
            debug!(caller = %ctx.caller, "register_provider rejected: caller is not the owner");
            return Err(ProviderError::Unauthorized { caller: ctx.caller });
        }

        if !self.providers.insert(provider) {
            debug!(%provider, "Provider already registered");
            return Ok(Receipt::empty());
        }

        info!(%provider, "Provider registered");
        Ok(Receipt::single(Event::ProviderRegistered { provider }))
    }

    /// Iterate over registered providers in address order.
    pub fn providers(&self) -> impl Iterator<Item = &Address> {
        self.providers.iter()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ProviderDirectory for ProviderRegistry {
    fn is_provider(&self, address: &Address) -> bool {
        self.providers.contains(address)
    }
}
