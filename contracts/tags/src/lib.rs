// Copyright (c) 2024 Botho Foundation

//! Tags contract: a fixed-supply token ledger with tag resources.
//!
//! The ledger mints its whole supply to its own address (the treasury) at
//! construction. Providers create tags, which moves a fixed amount from the
//! treasury into the tag; anyone can feed a tag back up to its maximum or
//! redeem part of it into a claim; the creating provider clears the tag,
//! which returns what is left to the treasury.
//!
//! At every point between calls:
//!
//! ```text
//! sum(account balances) + sum(tag balances) == total supply
//! 0 <= tag.balance <= max_balance
//! ```
//!
//! Every operation validates all of its preconditions before it mutates
//! anything, so a failed call leaves the ledger untouched.

mod balances;
mod error;
mod ledger;
mod policy;
mod tag;

pub use balances::Balances;
pub use error::TagError;
pub use ledger::TagLedger;
pub use policy::{
    ClaimPolicy, TagPolicy, DEFAULT_CLAIM_AMOUNT, DEFAULT_CREATE_AMOUNT, DEFAULT_FEED_AMOUNT,
    DEFAULT_MAX_BALANCE,
};
pub use tag::Tag;
