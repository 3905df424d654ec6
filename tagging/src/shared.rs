// Copyright (c) 2024 Botho Foundation

//! Deployment shared between threads.

use parking_lot::Mutex;
use std::sync::Arc;
use tagging_contract_types::{Address, Amount, Receipt, TagId};
use tagging_tags::{Tag, TagError};

use crate::{CallError, Deployment};

/// Thread-safe handle to a deployment.
///
/// One lock guards all three contracts, so every call runs with exclusive
/// access to the whole deployment and calls never interleave.
#[derive(Clone)]
pub struct SharedDeployment {
    inner: Arc<Mutex<Deployment>>,
}

impl SharedDeployment {
    pub fn new(deployment: Deployment) -> Self {
        Self {
            inner: Arc::new(Mutex::new(deployment)),
        }
    }

    /// Run `f` with exclusive access to the deployment.
    pub fn with<T>(&self, f: impl FnOnce(&mut Deployment) -> T) -> T {
        f(&mut self.inner.lock())
    }

    pub fn register_provider(
        &self,
        caller: Address,
        provider: Address,
    ) -> Result<Receipt, CallError> {
        self.inner.lock().register_provider(caller, provider)
    }

    pub fn create_tag(&self, caller: Address) -> Result<Receipt, CallError> {
        self.inner.lock().create_tag(caller)
    }

    pub fn feed_tag(&self, caller: Address, tag_id: TagId) -> Result<Receipt, CallError> {
        self.inner.lock().feed_tag(caller, tag_id)
    }

    pub fn clear_tag(&self, caller: Address, tag_id: TagId) -> Result<Receipt, CallError> {
        self.inner.lock().clear_tag(caller, tag_id)
    }

    pub fn create_claim_for_tag(
        &self,
        caller: Address,
        tag_id: TagId,
    ) -> Result<Receipt, CallError> {
        self.inner.lock().create_claim_for_tag(caller, tag_id)
    }

    pub fn transfer(
        &self,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Receipt, CallError> {
        self.inner.lock().transfer(caller, to, amount)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.inner.lock().tags().allowance(owner, spender)
    }

    pub fn approve(
        &self,
        caller: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<Receipt, CallError> {
        self.inner.lock().approve(caller, spender, amount)
    }

    pub fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<Receipt, CallError> {
        self.inner.lock().transfer_from(caller, from, to, amount)
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.inner.lock().tags().balance_of(account)
    }

    pub fn tag(&self, tag_id: &TagId) -> Option<Tag> {
        self.inner.lock().tags().tag(tag_id).copied()
    }

    pub fn check_invariants(&self) -> Result<(), TagError> {
        self.inner.lock().tags().check_invariants()
    }

    /// Take the deployment back if this is the last handle.
    pub fn into_inner(self) -> Result<Deployment, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}
