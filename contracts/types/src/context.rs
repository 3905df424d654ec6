// Copyright (c) 2024 Botho Foundation

//! Per-call context supplied by the host.

use crate::Address;

/// Length of the host entropy attached to each call.
pub const ENTROPY_LEN: usize = 32;

/// What the host attaches to every contract call.
///
/// The caller identity is authenticated by the host; contracts only
/// compare it against stored identities.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CallContext {
    /// The authenticated caller.
    pub caller: Address,
    /// Host-supplied randomness for this call.
    pub entropy: [u8; ENTROPY_LEN],
}

impl CallContext {
    pub fn new(caller: Address, entropy: [u8; ENTROPY_LEN]) -> Self {
        Self { caller, entropy }
    }

    /// A context with no entropy, for calls that never consume it.
    pub fn from_caller(caller: Address) -> Self {
        Self::new(caller, [0u8; ENTROPY_LEN])
    }
}
