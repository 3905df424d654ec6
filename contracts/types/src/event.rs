// Copyright (c) 2024 Botho Foundation

//! Contract events and call receipts.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, TagId};

/// An event emitted by a successful contract call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum Event {
    /// A provider was added to the registry.
    ProviderRegistered { provider: Address },

    /// A provider created a tag.
    TagIdGenerated { creator: Address, tag_id: TagId },

    /// A tag was topped up from the treasury.
    TagFed {
        tag_id: TagId,
        amount: Amount,
        balance: Amount,
    },

    /// A tag was cleared by its provider.
    TagIdRemoved { tag_id: TagId },

    /// Value was redeemed from a tag into a claim.
    ClaimGenerated {
        tag_id: TagId,
        claimant: Address,
        amount: Amount,
        claim_id: u64,
    },

    /// Tokens moved between accounts.
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },

    /// An allowance was set.
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },
}

impl Event {
    /// The event name, as indexers see it.
    pub fn name(&self) -> &'static str {
        match self {
            Event::ProviderRegistered { .. } => "ProviderRegistered",
            Event::TagIdGenerated { .. } => "TagIdGenerated",
            Event::TagFed { .. } => "TagFed",
            Event::TagIdRemoved { .. } => "TagIdRemoved",
            Event::ClaimGenerated { .. } => "ClaimGenerated",
            Event::Transfer { .. } => "Transfer",
            Event::Approval { .. } => "Approval",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ProviderRegistered { provider } => {
                write!(f, "ProviderRegistered provider={}", provider)
            }
            Event::TagIdGenerated { creator, tag_id } => {
                write!(f, "TagIdGenerated creator={} tag_id={}", creator, tag_id)
            }
            Event::TagFed {
                tag_id,
                amount,
                balance,
            } => write!(
                f,
                "TagFed tag_id={} amount={} balance={}",
                tag_id, amount, balance
            ),
            Event::TagIdRemoved { tag_id } => write!(f, "TagIdRemoved tag_id={}", tag_id),
            Event::ClaimGenerated {
                tag_id,
                claimant,
                amount,
                claim_id,
            } => write!(
                f,
                "ClaimGenerated tag_id={} claimant={} amount={} claim_id={}",
                tag_id, claimant, amount, claim_id
            ),
            Event::Transfer { from, to, amount } => {
                write!(f, "Transfer from={} to={} amount={}", from, to, amount)
            }
            Event::Approval {
                owner,
                spender,
                amount,
            } => write!(
                f,
                "Approval owner={} spender={} amount={}",
                owner, spender, amount
            ),
        }
    }
}

/// The events emitted by one successful call.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub logs: Vec<Event>,
}

impl Receipt {
    /// A receipt carrying no events.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A receipt carrying exactly one event.
    pub fn single(event: Event) -> Self {
        Self { logs: vec![event] }
    }

    /// The id of the tag created by this call, if any.
    pub fn created_tag(&self) -> Option<TagId> {
        self.logs.iter().find_map(|event| match event {
            Event::TagIdGenerated { tag_id, .. } => Some(*tag_id),
            _ => None,
        })
    }
}
